use std::collections::{HashMap, HashSet};

use crate::model::chan::{
    Board, CatalogPage, ThreadPost, country_flag_url, format_bytes, image_url, media_kind,
    thumbnail_url,
};
use crate::model::{BoardInfo, Item, Page, Screen};
use crate::ops::routes::Route;
use crate::ops::text::{
    extract_all_quotes, extract_links, extract_quotes, html_to_text, strip_header_quotes,
    unescape_entities,
};

fn board_description(board: &Board) -> String {
    let description = board
        .meta_description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(&board.title);
    unescape_entities(description)
}

/// Mark the item whose post id (or board code) equals `selected`, else the first.
fn apply_selection(items: &mut [Item], selected: Option<&str>, key: impl Fn(&Item) -> Option<&str>) {
    let index = selected
        .and_then(|sel| items.iter().position(|item| key(item) == Some(sel)))
        .unwrap_or(0);
    if let Some(item) = items.get_mut(index) {
        item.preselected = true;
    }
}

/// Attach links found in the body
fn with_links(mut item: Item) -> Item {
    item.links = extract_links(&item.body);
    item
}

/// The board list
pub fn home_page(boards: &[Board], selected: Option<&str>) -> Page {
    let url = Route::Home.to_string();
    if boards.is_empty() {
        return Page::error(url, Screen::Home, "No boards available.");
    }

    let mut page = Page::new(url, Screen::Home, "Boards");
    page.items = boards
        .iter()
        .map(|board| Item {
            heading: format!("/{}/ - {}", board.board, board.title),
            target: Some(
                Route::Catalog {
                    board: board.board.clone(),
                }
                .to_string(),
            ),
            description: Some(board_description(board)),
            board: Some(BoardInfo {
                code: board.board.clone(),
                title: board.title.clone(),
            }),
            ..Default::default()
        })
        .collect();
    apply_selection(&mut page.items, selected, |item| {
        item.board.as_ref().map(|b| b.code.as_str())
    });
    page
}

/// Threads of one board, flattened across catalog pages
pub fn catalog_page(board: &str, catalog: &[CatalogPage], selected: Option<&str>) -> Page {
    let route = Route::Catalog {
        board: board.to_string(),
    };
    let mut page = Page::new(route.to_string(), Screen::Catalog, format!("/{}/ catalog", board));

    for thread in catalog.iter().flat_map(|p| p.threads.iter()) {
        let mut heading = format!(
            "{} No.{}",
            thread.name.as_deref().unwrap_or("Anonymous"),
            thread.no
        );
        if let Some(now) = thread.now.as_deref().filter(|n| !n.is_empty()) {
            heading.push(' ');
            heading.push_str(now);
        }
        heading.push_str(&format!(
            "  R: {} / I: {}",
            thread.replies.unwrap_or(0),
            thread.images.unwrap_or(0)
        ));

        let comment = html_to_text(thread.com.as_deref());
        let body = match thread.sub.as_deref().map(unescape_entities) {
            Some(sub) if !sub.is_empty() && !comment.is_empty() => format!("{}\n{}", sub, comment),
            Some(sub) if !sub.is_empty() => sub,
            _ => comment,
        };

        page.items.push(with_links(Item {
            heading,
            body,
            post_id: Some(thread.no.to_string()),
            target: Some(
                Route::Thread {
                    board: board.to_string(),
                    thread: thread.no,
                }
                .to_string(),
            ),
            thumbnail: thumbnail_url(board, thread.tim),
            flag: country_flag_url(thread.country.as_deref()),
            ..Default::default()
        }));
    }

    apply_selection(&mut page.items, selected, |item| item.post_id.as_deref());
    page
}

/// For every post, the later posts that quote it
pub fn reply_map(posts: &[ThreadPost]) -> HashMap<u64, Vec<u64>> {
    let ids: HashSet<u64> = posts.iter().map(|p| p.no).collect();
    let mut replies: HashMap<u64, Vec<u64>> = posts.iter().map(|p| (p.no, Vec::new())).collect();

    for post in posts {
        let text = html_to_text(post.com.as_deref());
        for quoted in extract_all_quotes(&text) {
            let Ok(quoted) = quoted.parse::<u64>() else {
                continue;
            };
            if quoted == post.no || !ids.contains(&quoted) {
                continue;
            }
            let from = replies.entry(quoted).or_default();
            if !from.contains(&post.no) {
                from.push(post.no);
            }
        }
    }
    replies
}

fn quote_line(label: &str, ids: impl IntoIterator<Item = String>) -> String {
    let quotes: Vec<String> = ids.into_iter().map(|id| format!(">>{}", id)).collect();
    if label.is_empty() {
        quotes.join(" ")
    } else {
        format!("{} {}", label, quotes.join(" "))
    }
}

/// One post as an item: header quotes, body, attached file, then replies
fn post_item(board: &str, thread: u64, post: &ThreadPost, reply_from: &[u64]) -> Item {
    let comment = html_to_text(post.com.as_deref());
    let (header_quotes, _) = extract_quotes(&comment);

    let mut lines = Vec::new();
    if !header_quotes.is_empty() {
        lines.push(quote_line("", header_quotes));
    }
    let body = strip_header_quotes(&comment);
    if !body.is_empty() {
        lines.push(body);
    }

    let full_image = image_url(board, post.tim, post.ext.as_deref());
    if let Some(url) = &full_image {
        let mut file_line = String::from("File:");
        if let Some(name) = file_name(post) {
            file_line.push(' ');
            file_line.push_str(&name);
        }
        if let Some(size) = format_bytes(post.fsize) {
            file_line.push_str(&format!(" ({})", size));
        }
        file_line.push_str(&format!(
            " [{:?}] {}",
            media_kind(post.ext.as_deref()),
            url
        ));
        lines.push(file_line);
    }
    if !reply_from.is_empty() {
        lines.push(quote_line(
            "Replies:",
            reply_from.iter().map(|n| n.to_string()),
        ));
    }

    let mut heading = format!("{} No.{}", post.name.as_deref().unwrap_or("Anonymous"), post.no);
    if let Some(now) = post.now.as_deref().filter(|n| !n.is_empty()) {
        heading.push(' ');
        heading.push_str(now);
    }
    if let Some(country) = post.country_name.as_deref().filter(|c| !c.is_empty()) {
        heading.push_str(&format!(" [{}]", country));
    }

    with_links(Item {
        heading,
        body: lines.join("\n"),
        post_id: Some(post.no.to_string()),
        target: full_image.map(|_| {
            Route::Post {
                board: board.to_string(),
                thread,
                post: post.no,
            }
            .to_string()
        }),
        thumbnail: thumbnail_url(board, post.tim),
        flag: country_flag_url(post.country.as_deref()),
        ..Default::default()
    })
}

fn file_name(post: &ThreadPost) -> Option<String> {
    match (post.filename.as_deref(), post.ext.as_deref()) {
        (Some(name), Some(ext)) => Some(format!("{}{}", name, ext)),
        _ => None,
    }
}

/// All posts of a thread
pub fn thread_page(board: &str, thread: u64, posts: &[ThreadPost], selected: Option<&str>) -> Page {
    let route = Route::Thread {
        board: board.to_string(),
        thread,
    };
    let mut page = Page::new(
        route.to_string(),
        Screen::Thread,
        format!("/{}/ thread {}", board, thread),
    );
    let replies = reply_map(posts);
    page.items = posts
        .iter()
        .map(|post| {
            let from = replies.get(&post.no).map(Vec::as_slice).unwrap_or(&[]);
            post_item(board, thread, post, from)
        })
        .collect();
    apply_selection(&mut page.items, selected, |item| item.post_id.as_deref());
    page
}

/// A single post of a thread
pub fn post_page(board: &str, thread: u64, posts: &[ThreadPost], post: u64) -> Page {
    let route = Route::Post {
        board: board.to_string(),
        thread,
        post,
    };
    let Some(found) = posts.iter().find(|p| p.no == post) else {
        return Page::error(route.to_string(), Screen::Post, "Post not found.");
    };
    let replies = reply_map(posts);
    let from = replies.get(&post).map(Vec::as_slice).unwrap_or(&[]);

    let mut item = post_item(board, thread, found, from);
    item.target = image_url(board, found.tim, found.ext.as_deref()).map(|_| {
        Route::Image {
            board: board.to_string(),
            thread,
            post,
        }
        .to_string()
    });
    item.preselected = true;

    let mut page = Page::new(route.to_string(), Screen::Post, format!("/{}/ post {}", board, post));
    page.items.push(item);
    page
}

/// The file attached to one post: name, kind, size and where to open it
pub fn image_page(board: &str, thread: u64, posts: &[ThreadPost], post: u64) -> Page {
    let route = Route::Image {
        board: board.to_string(),
        thread,
        post,
    };
    let found = posts.iter().find(|p| p.no == post);
    let Some((found, url)) =
        found.and_then(|p| image_url(board, p.tim, p.ext.as_deref()).map(|url| (p, url)))
    else {
        return Page::error(route.to_string(), Screen::Image, "Image not available.");
    };

    let mut lines = vec![format!("Kind: {:?}", media_kind(found.ext.as_deref()))];
    if let Some(size) = format_bytes(found.fsize) {
        lines.push(format!("Size: {}", size));
    }
    lines.push(format!("Open: {}", url));
    let thumbnail = thumbnail_url(board, found.tim);
    if let Some(thumb) = &thumbnail {
        lines.push(format!("Thumbnail: {}", thumb));
    }

    let mut page = Page::new(route.to_string(), Screen::Image, format!("/{}/ image {}", board, post));
    page.items.push(with_links(Item {
        heading: file_name(found).unwrap_or_else(|| format!("File No.{}", post)),
        body: lines.join("\n"),
        post_id: Some(post.to_string()),
        thumbnail,
        preselected: true,
        ..Default::default()
    }));
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LinkTarget;
    use crate::model::chan::CatalogThread;

    fn post(no: u64, com: &str) -> ThreadPost {
        ThreadPost {
            no,
            com: Some(com.to_string()),
            ..Default::default()
        }
    }

    fn board(code: &str, title: &str) -> Board {
        Board {
            board: code.into(),
            title: title.into(),
            ws_board: 1,
            pages: 10,
            per_page: 15,
            meta_description: None,
        }
    }

    #[test]
    fn home_lists_boards_and_selects_first() {
        let page = home_page(&[board("v", "Video Games"), board("g", "Technology")], None);
        assert_eq!(page.screen, Screen::Home);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].heading, "/v/ - Video Games");
        assert_eq!(page.items[0].target.as_deref(), Some("/board/v/catalog"));
        assert_eq!(page.items[0].description.as_deref(), Some("Video Games"));
        assert!(page.items[0].preselected);
        assert!(!page.items[1].preselected);
    }

    #[test]
    fn home_honors_selected_board() {
        let page = home_page(&[board("v", "Video Games"), board("g", "Technology")], Some("g"));
        assert!(!page.items[0].preselected);
        assert!(page.items[1].preselected);
    }

    #[test]
    fn home_without_boards_is_error() {
        let page = home_page(&[], None);
        assert_eq!(page.error.as_deref(), Some("No boards available."));
    }

    #[test]
    fn home_description_prefers_meta() {
        let mut b = board("g", "Technology");
        b.meta_description = Some("&quot;/g/&quot; is for tech".into());
        let page = home_page(&[b], None);
        assert_eq!(page.items[0].description.as_deref(), Some("\"/g/\" is for tech"));
    }

    #[test]
    fn catalog_items_target_threads() {
        let catalog = vec![CatalogPage {
            threads: vec![CatalogThread {
                no: 123,
                sub: Some("Hello".into()),
                com: Some("see https://example.com".into()),
                replies: Some(4),
                ..Default::default()
            }],
        }];
        let page = catalog_page("g", &catalog, None);
        let item = &page.items[0];
        assert_eq!(item.target.as_deref(), Some("/board/g/thread/123"));
        assert_eq!(item.body, "Hello\nsee https://example.com");
        assert!(item.heading.contains("R: 4 / I: 0"));
        assert_eq!(item.links.len(), 1);
    }

    #[test]
    fn reply_map_skips_self_and_unknown_quotes() {
        let posts = vec![
            post(1, "op"),
            post(2, "&gt;&gt;1 agreed &gt;&gt;2 &gt;&gt;99"),
            post(3, "&gt;&gt;1<br>&gt;&gt;1 twice"),
        ];
        let map = reply_map(&posts);
        assert_eq!(map[&1], vec![2, 3]);
        assert!(map[&2].is_empty());
    }

    #[test]
    fn thread_post_body_has_header_quotes_then_replies() {
        let posts = vec![post(1, "op here"), post(2, "&gt;&gt;1<br>nice")];
        let page = thread_page("g", 1, &posts, Some("2"));
        assert_eq!(page.items[0].body, "op here\nReplies: >>2");
        assert_eq!(page.items[1].body, ">>1\nnice");
        assert!(page.items[1].preselected);
        assert_eq!(
            page.items[0].links[0].target,
            Some(LinkTarget::Quote("2".into()))
        );
    }

    #[test]
    fn thread_post_with_file_links_image() {
        let mut p = post(1, "pic");
        p.tim = Some(1700);
        p.ext = Some(".png".into());
        p.filename = Some("cat".into());
        p.fsize = Some(2048);
        let page = thread_page("g", 1, &[p], None);
        let item = &page.items[0];
        assert_eq!(item.target.as_deref(), Some("/board/g/thread/1/post/1"));
        assert!(item.body.contains("File: cat.png (2.0 KB) [Image] https://i.4cdn.org/g/1700.png"));
        assert_eq!(
            item.links[0].target,
            Some(LinkTarget::External("https://i.4cdn.org/g/1700.png".into()))
        );
    }

    #[test]
    fn post_page_missing_post_is_error() {
        let page = post_page("g", 1, &[post(1, "x")], 5);
        assert_eq!(page.error.as_deref(), Some("Post not found."));
    }

    #[test]
    fn post_page_single_selected_item() {
        let page = post_page("g", 1, &[post(1, "x"), post(2, "&gt;&gt;1")], 1);
        assert_eq!(page.items.len(), 1);
        assert!(page.items[0].preselected);
        assert!(page.items[0].target.is_none());
        assert!(page.items[0].body.ends_with("Replies: >>2"));
    }

    fn with_file(mut p: ThreadPost) -> ThreadPost {
        p.tim = Some(1700);
        p.ext = Some(".webm".into());
        p.filename = Some("clip".into());
        p.fsize = Some(1536);
        p.country = Some("NZ".into());
        p
    }

    #[test]
    fn post_page_targets_image_view() {
        let page = post_page("g", 1, &[with_file(post(1, "x"))], 1);
        let item = &page.items[0];
        assert_eq!(item.target.as_deref(), Some("/board/g/thread/1/post/1/image"));
        assert_eq!(item.thumbnail.as_deref(), Some("https://i.4cdn.org/g/1700s.jpg"));
        assert_eq!(item.flag.as_deref(), Some("https://s.4cdn.org/image/country/nz.gif"));
    }

    #[test]
    fn image_page_describes_file() {
        let page = image_page("g", 1, &[post(1, "x"), with_file(post(2, "y"))], 2);
        assert_eq!(page.screen, Screen::Image);
        assert!(page.error.is_none());
        let item = &page.items[0];
        assert_eq!(item.heading, "clip.webm");
        assert_eq!(
            item.body,
            "Kind: Video\nSize: 1.5 KB\nOpen: https://i.4cdn.org/g/1700.webm\nThumbnail: https://i.4cdn.org/g/1700s.jpg"
        );
        assert!(item.preselected);
        assert_eq!(
            item.links[0].target,
            Some(LinkTarget::External("https://i.4cdn.org/g/1700.webm".into()))
        );
        assert_eq!(item.links.len(), 2);
    }

    #[test]
    fn image_page_without_file_is_error() {
        let posts = [post(1, "x")];
        let page = image_page("g", 1, &posts, 1);
        assert_eq!(page.error.as_deref(), Some("Image not available."));
        let page = image_page("g", 1, &posts, 9);
        assert_eq!(page.error.as_deref(), Some("Image not available."));
        assert_eq!(page.url, "/board/g/thread/1/post/9/image");
    }

    #[test]
    fn catalog_items_carry_thumbnail() {
        let catalog = vec![CatalogPage {
            threads: vec![CatalogThread {
                no: 5,
                tim: Some(42),
                ext: Some(".jpg".into()),
                ..Default::default()
            }],
        }];
        let page = catalog_page("g", &catalog, None);
        assert_eq!(page.items[0].thumbnail.as_deref(), Some("https://i.4cdn.org/g/42s.jpg"));
        assert!(page.items[0].flag.is_none());
    }
}

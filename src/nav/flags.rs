/// The one piece of navigation state that outlives a page: whether the last
/// navigation came from quick-jump. Read once when the home page is shown
/// again, then cleared.
pub trait SessionFlags {
    fn quick_jump_navigated(&self) -> bool;
    fn set_quick_jump_navigated(&mut self);
    fn clear_quick_jump_navigated(&mut self);
}

/// In-memory flags, for tests and one-shot CLI use
#[derive(Debug, Clone, Default)]
pub struct MemoryFlags {
    navigated: bool,
}

impl SessionFlags for MemoryFlags {
    fn quick_jump_navigated(&self) -> bool {
        self.navigated
    }

    fn set_quick_jump_navigated(&mut self) {
        self.navigated = true;
    }

    fn clear_quick_jump_navigated(&mut self) {
        self.navigated = false;
    }
}

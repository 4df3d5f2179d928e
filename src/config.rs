#[derive(Debug, Clone)]
pub struct RegexConfig {
    pub cache_size: usize,
    pub size_limit: Option<usize>,
    /// Only honoured by the `fancy-regex` engine.
    pub backtrack_limit: Option<usize>,
}

impl Default for RegexConfig {
    fn default() -> Self {
        Self {
            cache_size: 64,
            size_limit: None,
            backtrack_limit: None,
        }
    }
}

impl RegexConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache_size(mut self, n: usize) -> Self {
        self.cache_size = n;
        self
    }

    pub fn size_limit(mut self, bytes: usize) -> Self {
        self.size_limit = Some(bytes);
        self
    }

    pub fn backtrack_limit(mut self, steps: usize) -> Self {
        self.backtrack_limit = Some(steps);
        self
    }
}

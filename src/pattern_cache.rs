use crate::config::RegexConfig;
use crate::error::RegexError;
use crate::pattern::Pattern;
use crate::re::{self, Compiled};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::debug;

pub struct PatternCache {
    lru: LruCache<String, Arc<Compiled>>,
}

impl PatternCache {
    pub fn new(cap: usize) -> Self {
        // LruCache requires NonZeroUsize; clamp 0 to 1
        let cap_nz = NonZeroUsize::new(cap).unwrap_or(NonZeroUsize::MIN);
        Self {
            lru: LruCache::new(cap_nz),
        }
    }

    pub fn len(&self) -> usize {
        self.lru.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lru.is_empty()
    }

    /// Keyed by the raw pattern string, so `/a/g` and `/a/` are distinct entries.
    pub fn get_or_compile(
        &mut self,
        pattern: &Pattern,
        cfg: &RegexConfig,
    ) -> Result<Arc<Compiled>, RegexError> {
        if let Some(re) = self.lru.get(pattern.as_str()) {
            return Ok(Arc::clone(re));
        }
        let source = pattern.engine_source()?;
        debug!(pattern = %pattern, source = %source, "compiling pattern");
        let re = Arc::new(re::compile(&source, cfg)?);
        self.lru.put(pattern.as_str().to_owned(), Arc::clone(&re));
        Ok(re)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reuses_compiled_patterns() {
        let cfg = RegexConfig::default();
        let mut cache = PatternCache::new(4);
        let a = cache.get_or_compile(&Pattern::new("/a+/"), &cfg).unwrap();
        let b = cache.get_or_compile(&Pattern::new("/a+/"), &cfg).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let cfg = RegexConfig::default();
        let mut cache = PatternCache::new(0);
        cache.get_or_compile(&Pattern::new("/a/"), &cfg).unwrap();
        cache.get_or_compile(&Pattern::new("/b/"), &cfg).unwrap();
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn invalid_patterns_are_not_cached() {
        let cfg = RegexConfig::default();
        let mut cache = PatternCache::new(4);
        assert!(cache.get_or_compile(&Pattern::new("/(/"), &cfg).is_err());
        assert!(cache.get_or_compile(&Pattern::new("/a/q"), &cfg).is_err());
        assert!(cache.is_empty());
    }
}

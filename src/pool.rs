// src/pool.rs
// Embedded last-resort quote pool. Static, never mutated at runtime; also the
// corpus scanned by degraded-mode tag/keyword filtering.

use once_cell::sync::Lazy;

use crate::error::PoolConfigError;
use crate::quote::Quote;

fn local(id: &str, content: &str, author: &str, tags: &[&str]) -> Quote {
    Quote {
        id: id.to_string(),
        content: content.to_string(),
        author: author.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

static LOCAL_QUOTES: Lazy<Vec<Quote>> = Lazy::new(|| {
    vec![
        local(
            "local-1",
            "The only way to do great work is to love what you do.",
            "Steve Jobs",
            &["motivational", "work"],
        ),
        local(
            "local-2",
            "Innovation distinguishes between a leader and a follower.",
            "Steve Jobs",
            &["innovation", "leadership"],
        ),
        local(
            "local-3",
            "The future belongs to those who believe in the beauty of their dreams.",
            "Eleanor Roosevelt",
            &["dreams", "future"],
        ),
        local(
            "local-4",
            "It is during our darkest moments that we must focus to see the light.",
            "Aristotle",
            &["wisdom", "hope"],
        ),
        local(
            "local-5",
            "Success is not final, failure is not fatal: it is the courage to continue that counts.",
            "Winston Churchill",
            &["success", "courage"],
        ),
        local(
            "local-6",
            "In the middle of difficulty lies opportunity.",
            "Albert Einstein",
            &["opportunity", "wisdom"],
        ),
        local(
            "local-7",
            "What you do speaks so loudly that I cannot hear what you say.",
            "Ralph Waldo Emerson",
            &["character", "action"],
        ),
        local(
            "local-8",
            "The unexamined life is not worth living.",
            "Socrates",
            &["philosophy", "wisdom"],
        ),
        local(
            "local-9",
            "Do not go where the path may lead, go instead where there is no path and leave a trail.",
            "Ralph Waldo Emerson",
            &["individuality", "courage"],
        ),
        local(
            "local-10",
            "Happiness is not something ready made. It comes from your own actions.",
            "Dalai Lama",
            &["happiness", "action"],
        ),
        local(
            "local-11",
            "It always seems impossible until it is done.",
            "Nelson Mandela",
            &["perseverance", "motivational"],
        ),
        local(
            "local-12",
            "The journey of a thousand miles begins with a single step.",
            "Lao Tzu",
            &["journey", "beginnings"],
        ),
        local(
            "local-13",
            "Whether you think you can or you think you can't, you're right.",
            "Henry Ford",
            &["mindset", "confidence"],
        ),
        local(
            "local-14",
            "We are what we repeatedly do. Excellence, then, is not an act, but a habit.",
            "Will Durant",
            &["excellence", "habit"],
        ),
        local(
            "local-15",
            "Turn your wounds into wisdom.",
            "Oprah Winfrey",
            &["wisdom", "resilience"],
        ),
    ]
});

#[derive(Debug, Clone, Copy)]
pub struct LocalPool {
    quotes: &'static [Quote],
}

impl LocalPool {
    /// The embedded pool. Errors only when the compiled-in list is empty,
    /// which is a configuration defect callers should treat as fatal.
    pub fn embedded() -> Result<Self, PoolConfigError> {
        let quotes: &'static [Quote] = &LOCAL_QUOTES;
        if quotes.is_empty() {
            return Err(PoolConfigError);
        }
        Ok(Self { quotes })
    }

    pub fn all(&self) -> &'static [Quote] {
        self.quotes
    }

    /// Pool entries matching the needle (case-insensitive substring match
    /// against content, author and tags).
    pub fn matching(&self, needle: &str) -> Vec<&'static Quote> {
        self.quotes.iter().filter(|q| q.matches(needle)).collect()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

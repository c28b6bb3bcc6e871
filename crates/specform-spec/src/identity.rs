//! Content-derived identity: hash, slug and id.

use sha2::{Digest, Sha256};

/// Number of hash characters used in ids and artifact names.
pub const SHORT_HASH_LEN: usize = 6;

/// Hash, slug and id derived for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub hash: String,
    pub slug: String,
    pub id: String,
}

impl Identity {
    pub fn derive(document: &[u8], title: &str) -> Self {
        let hash = content_hash(document);
        let slug = slugify(title);
        let id = id_from(&slug, &hash);
        Self { hash, slug, id }
    }
}

/// SHA-256 of the raw document as lowercase hex.
pub fn content_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Leading characters of a hash, or the whole hash if it is shorter.
pub fn short_hash(hash: &str) -> &str {
    hash.get(..SHORT_HASH_LEN).unwrap_or(hash)
}

/// `<slug>-<short hash>`
pub fn id_from(slug: &str, hash: &str) -> String {
    format!("{}-{}", slug, short_hash(hash))
}

/// Lowercase the title, drop everything outside `[a-z0-9_\s-]`, turn
/// whitespace runs into dashes and collapse repeated dashes.
pub fn slugify(title: &str) -> String {
    let lowered = title.trim().to_lowercase();

    let mut slug = String::with_capacity(lowered.len());
    for c in lowered.chars() {
        let c = match c {
            'a'..='z' | '0'..='9' | '_' | '-' => c,
            c if c.is_whitespace() => '-',
            _ => continue,
        };
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }

    slug
}

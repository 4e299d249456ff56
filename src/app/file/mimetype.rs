//! Content type and encoding guessed from a file extension
//!
//! Compressed files are described as an encoding on top of an (often
//! unknown) content type: `x.rnx.gz` has no known content type and a
//! `gzip` encoding, while `x.rnx.tar` is an `application/x-tar` archive.

use serde::Serialize;

/// Shorthand suffixes that expand to two extensions
const SUFFIX_MAP: &[(&str, &str)] = &[
    (".svgz", ".svg.gz"),
    (".tgz", ".tar.gz"),
    (".taz", ".tar.gz"),
    (".tz", ".tar.gz"),
    (".tbz2", ".tar.bz2"),
    (".txz", ".tar.xz"),
];

/// Extensions describing a compression layer
const ENCODINGS_MAP: &[(&str, &str)] = &[
    (".gz", "gzip"),
    (".Z", "compress"),
    (".bz2", "bzip2"),
    (".xz", "xz"),
    (".br", "br"),
];

/// Extensions describing a content type
const TYPES_MAP: &[(&str, &str)] = &[
    (".tar", "application/x-tar"),
    (".zip", "application/zip"),
    (".json", "application/json"),
    (".pdf", "application/pdf"),
    (".txt", "text/plain"),
    (".csv", "text/csv"),
    (".html", "text/html"),
    (".htm", "text/html"),
    (".xml", "text/xml"),
    (".svg", "image/svg+xml"),
];

/// Guessed content type and encoding of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MimeType {
    /// MIME type of the content, when the extension is known
    pub content_type: Option<&'static str>,
    /// Compression applied on top of the content
    pub encoding: Option<&'static str>,
}

impl MimeType {
    /// Guess the type of a file from its name
    pub fn guess(name: &str) -> Self {
        let (mut base, mut ext) = split_ext(name);

        while let Some(replacement) = lookup(SUFFIX_MAP, &ext) {
            let expanded = format!("{}{}", base, replacement);
            (base, ext) = split_ext(&expanded);
        }

        let encoding = lookup_folded(ENCODINGS_MAP, &ext);
        if encoding.is_some() {
            (_, ext) = split_ext(&base);
        }

        Self {
            content_type: lookup_folded(TYPES_MAP, &ext),
            encoding,
        }
    }

    /// Whether any compression layer was recognized
    pub fn is_compressed(&self) -> bool {
        self.encoding.is_some()
    }
}

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Exact match first, then a lower-cased one
fn lookup_folded(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    lookup(table, key).or_else(|| lookup(table, &key.to_lowercase()))
}

/// Split a name into stem and final extension (with its dot). Leading dots
/// do not start an extension.
fn split_ext(name: &str) -> (String, String) {
    let leading = name.len() - name.trim_start_matches('.').len();
    match name[leading..].rfind('.') {
        Some(idx) => {
            let idx = idx + leading;
            (name[..idx].to_string(), name[idx..].to_string())
        }
        None => (name.to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gzip_encoding() {
        let mime = MimeType::guess("NYA100NOR_S_20230700000_01D_30S_MO.crx.sum.gz");
        assert_eq!(mime.content_type, None);
        assert_eq!(mime.encoding, Some("gzip"));
        assert!(mime.is_compressed());
    }

    #[test]
    fn test_unix_compress() {
        let mime = MimeType::guess("tabv069w.21m.Z");
        assert_eq!(
            mime,
            MimeType {
                content_type: None,
                encoding: Some("compress")
            }
        );
    }

    #[test]
    fn test_tar_archive() {
        let mime = MimeType::guess("DJIG00DJI_R_20211300000_01D_01S_RN.rnx.tar");
        assert_eq!(mime.content_type, Some("application/x-tar"));
        assert_eq!(mime.encoding, None);
    }

    #[test]
    fn test_suffix_expansion() {
        let mime = MimeType::guess("bundle.tgz");
        assert_eq!(mime.content_type, Some("application/x-tar"));
        assert_eq!(mime.encoding, Some("gzip"));
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(MimeType::guess("readme"), MimeType::default());
        assert_eq!(MimeType::guess(".hidden"), MimeType::default());
        assert_eq!(MimeType::guess("site.LOG.TXT").content_type, Some("text/plain"));
    }
}

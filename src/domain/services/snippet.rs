//! Tracking snippet injection

/// Insert `snippet` immediately after the first occurrence of `marker`.
///
/// Works on raw bytes: neither the page nor the snippet has to be UTF-8.
/// Returns `None` when the marker does not appear (or is empty). Later
/// occurrences of the marker are left untouched.
pub fn inject_after_marker(html: &[u8], snippet: &[u8], marker: &str) -> Option<Vec<u8>> {
    let marker = marker.as_bytes();
    if marker.is_empty() {
        return None;
    }

    let at = html
        .windows(marker.len())
        .position(|window| window == marker)?
        + marker.len();

    let mut out = Vec::with_capacity(html.len() + snippet.len());
    out.extend_from_slice(&html[..at]);
    out.extend_from_slice(snippet);
    out.extend_from_slice(&html[at..]);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn inserts_directly_after_marker() {
        let html = b"<html><head><title>x</title></head></html>";
        let out = inject_after_marker(html, b"<script>gtag()</script>", "<head>").unwrap();
        assert_eq!(
            out,
            b"<html><head><script>gtag()</script><title>x</title></head></html>"
        );
    }

    #[test]
    fn only_first_marker_is_patched() {
        let html = b"<head>a</head><template><head>b</head></template>";
        let out = inject_after_marker(html, b"S", "<head>").unwrap();
        assert_eq!(out, b"<head>Sa</head><template><head>b</head></template>");
    }

    #[test]
    fn missing_marker_returns_none() {
        assert!(inject_after_marker(b"<html></html>", b"S", "<head>").is_none());
    }

    #[test]
    fn empty_marker_returns_none() {
        assert!(inject_after_marker(b"<head>", b"S", "").is_none());
    }

    #[test]
    fn marker_is_matched_literally() {
        let html = b"<head lang=\"en\">x</head>";
        assert!(inject_after_marker(html, b"S", "<head>").is_none());
    }

    #[test]
    fn marker_longer_than_page_is_missing() {
        assert!(inject_after_marker(b"<he", b"S", "<head>").is_none());
    }

    #[test]
    fn snippet_bytes_are_preserved() {
        let snippet = b"\n<!-- Global site tag -->\n<script async src=\"https://example.com/gtag/js?id=G-1\"></script>\n";
        let out = inject_after_marker(b"<head></head>", snippet, "<head>").unwrap();

        let mut expected = b"<head>".to_vec();
        expected.extend_from_slice(snippet);
        expected.extend_from_slice(b"</head>");
        assert_eq!(out, expected);
    }

    #[test]
    fn latin1_bytes_pass_through_unchanged() {
        let html = b"<html><head><title>R\xe9sum\xe9</title></head></html>";
        let out = inject_after_marker(html, b"<!-- caf\xe9 -->", "<head>").unwrap();
        assert_eq!(
            out,
            b"<html><head><!-- caf\xe9 --><title>R\xe9sum\xe9</title></head></html>"
        );
    }

    proptest! {
        #[test]
        fn injection_is_a_single_insertion_after_first_marker(
            before in "[a-z <>/]{0,40}",
            after in "[a-z <>/]{0,40}",
            snippet in proptest::collection::vec(any::<u8>(), 0..20),
        ) {
            prop_assume!(!before.contains("<head>"));
            let html = format!("{}<head>{}", before, after);

            let out = inject_after_marker(html.as_bytes(), &snippet, "<head>").unwrap();

            let mut expected = format!("{}<head>", before).into_bytes();
            expected.extend_from_slice(&snippet);
            expected.extend_from_slice(after.as_bytes());
            prop_assert_eq!(out.len(), html.len() + snippet.len());
            prop_assert_eq!(out, expected);
        }
    }
}

use std::collections::BTreeMap;

/// Offsets of every occurrence of `needle` in `haystack`.
pub fn find_all(haystack: &[u8], needle: &[u8]) -> Vec<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return Vec::new();
    }
    haystack
        .windows(needle.len())
        .enumerate()
        .filter_map(|(i, w)| (w == needle).then_some(i))
        .collect()
}

/// Asserts that `bytes[offset..offset + expected.len()]` is `expected`.
pub fn assert_region(bytes: &[u8], offset: usize, expected: &[u8]) {
    let actual = &bytes[offset..offset + expected.len()];
    assert!(
        actual == expected,
        "region at {} differs: {:?}",
        offset,
        String::from_utf8_lossy(actual)
    );
}

/// Reads back field values from merged bytes.
pub fn field_values(bytes: &[u8]) -> BTreeMap<String, String> {
    let doc = lopdf::Document::load_mem(bytes).expect("merged PDF parses");
    careform::read_field_values(&doc).expect("fields readable")
}

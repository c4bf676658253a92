/// Words of a heading, in order, for per-word reveal spans.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("SELECTED WORKS"), ["SELECTED", "WORKS"]);
        assert_eq!(split_words("  LET'S   WORK\n"), ["LET'S", "WORK"]);
        assert!(split_words("   ").is_empty());
    }
}

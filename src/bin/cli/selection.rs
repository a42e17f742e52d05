//! Parsing of entry index selections from the command line.

/// Parses a selection string like `"0,2,5-8"` into a list of indices.
///
/// Accepts comma-separated single indices and inclusive ranges. Whitespace
/// around tokens is ignored. Duplicates are kept (the library extracts them
/// in the order given). Returns an error message suitable for direct
/// display.
pub fn parse_indices(input: &str) -> Result<Vec<usize>, String> {
    let mut indices = Vec::new();
    for token in input.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        if let Some((start, end)) = token.split_once('-') {
            let start: usize = start
                .trim()
                .parse()
                .map_err(|_| format!("invalid index range '{}'", token))?;
            let end: usize = end
                .trim()
                .parse()
                .map_err(|_| format!("invalid index range '{}'", token))?;
            if end < start {
                return Err(format!("descending index range '{}'", token));
            }
            indices.extend(start..=end);
        } else {
            let index: usize = token
                .parse()
                .map_err(|_| format!("invalid index '{}'", token))?;
            indices.push(index);
        }
    }
    if indices.is_empty() {
        return Err("no indices given".to_string());
    }
    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_indices() {
        assert_eq!(parse_indices("0,2,7").unwrap(), vec![0, 2, 7]);
    }

    #[test]
    fn test_ranges() {
        assert_eq!(parse_indices("1-3").unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_indices("0, 2-4, 9").unwrap(), vec![0, 2, 3, 4, 9]);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_indices("a,b").is_err());
        assert!(parse_indices("5-2").is_err());
        assert!(parse_indices("").is_err());
        assert!(parse_indices("1-").is_err());
    }
}

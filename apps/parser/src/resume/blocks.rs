//! Block Segmenter: split a section into repeated entries (jobs, projects)
//! with a start-of-block predicate, then parse each block independently.

use tracing::debug;

use crate::errors::ParseError;

/// What happens to lines that appear before the first block start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leading {
    Keep,
    Drop,
}

/// Decides whether `lines[i]` opens a new block. Gets the whole slice for look-ahead.
pub type StartPredicate = fn(lines: &[&str], i: usize) -> bool;

#[derive(Debug, Clone, Copy)]
pub struct BlockSegmenter {
    pub is_start: StartPredicate,
    pub leading: Leading,
}

impl BlockSegmenter {
    pub fn new(is_start: StartPredicate, leading: Leading) -> Self {
        Self { is_start, leading }
    }

    /// Groups lines into blocks. Every block is non-empty and keeps document order.
    pub fn split<'a>(&self, lines: &[&'a str]) -> Vec<Vec<&'a str>> {
        let mut blocks: Vec<Vec<&'a str>> = Vec::new();
        let mut current: Vec<&'a str> = Vec::new();
        let mut started = false;

        for (i, &line) in lines.iter().enumerate() {
            if (self.is_start)(lines, i) {
                if !current.is_empty() && (started || self.leading == Leading::Keep) {
                    blocks.push(std::mem::take(&mut current));
                }
                current.clear();
                started = true;
            } else if !started && self.leading == Leading::Drop {
                continue;
            }
            current.push(line);
        }

        if !current.is_empty() {
            blocks.push(current);
        }
        blocks
    }
}

/// Turns one block into an entry, or rejects it.
pub trait BlockParser {
    type Entry;

    fn name(&self) -> &'static str;

    fn parse(&self, block: &[&str]) -> Result<Self::Entry, ParseError>;
}

/// Parses every block, logging and skipping rejected ones.
pub fn parse_blocks<P: BlockParser>(parser: &P, blocks: &[Vec<&str>]) -> Vec<P::Entry> {
    blocks
        .iter()
        .filter_map(|block| match parser.parse(block) {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("{} block skipped: {e}", parser.name());
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn starts_with_hash(lines: &[&str], i: usize) -> bool {
        lines[i].starts_with('#')
    }

    #[test]
    fn test_split_on_predicate() {
        let lines = ["intro", "# a", "a1", "# b", "b1", "b2"];
        let keep = BlockSegmenter::new(starts_with_hash, Leading::Keep).split(&lines);
        assert_eq!(keep, vec![vec!["intro"], vec!["# a", "a1"], vec!["# b", "b1", "b2"]]);

        let drop = BlockSegmenter::new(starts_with_hash, Leading::Drop).split(&lines);
        assert_eq!(drop, vec![vec!["# a", "a1"], vec!["# b", "b1", "b2"]]);
    }

    #[test]
    fn test_no_start_keeps_or_drops_everything() {
        let lines = ["one", "two"];
        assert_eq!(
            BlockSegmenter::new(starts_with_hash, Leading::Keep).split(&lines),
            vec![vec!["one", "two"]]
        );
        assert!(BlockSegmenter::new(starts_with_hash, Leading::Drop)
            .split(&lines)
            .is_empty());
    }

    struct FirstLine;

    impl BlockParser for FirstLine {
        type Entry = String;

        fn name(&self) -> &'static str {
            "first-line"
        }

        fn parse(&self, block: &[&str]) -> Result<String, ParseError> {
            match block.first() {
                Some(line) if line.len() > 2 => Ok(line.to_string()),
                _ => Err(ParseError::extractor("first-line", "too short")),
            }
        }
    }

    #[test]
    fn test_rejected_blocks_are_skipped() {
        let blocks = vec![vec!["# a"], vec!["#"], vec!["# c", "x"]];
        assert_eq!(parse_blocks(&FirstLine, &blocks), vec!["# a", "# c"]);
    }
}

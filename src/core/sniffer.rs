use crate::core::decode::decode_sample;

pub const DEFAULT_DELIMITER: u8 = b',';
pub const DEFAULT_SAMPLE_SIZE: usize = 1024;

/// Candidate separators, in tie-break priority order.
const CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];

type LineCounts = [usize; CANDIDATES.len()];

/// Guesses the field delimiter from the first `sample_size` bytes of `data`.
///
/// Only a borrowed prefix is inspected, so callers parse the whole buffer
/// afterwards with the returned delimiter. Returns [`DEFAULT_DELIMITER`] when
/// no candidate is consistent across the sampled lines.
pub fn sniff_delimiter(data: &[u8], sample_size: usize) -> u8 {
    let sample = &data[..data.len().min(sample_size)];
    let truncated = data.len() > sample.len();

    let mut lines = count_per_line(&decode_sample(sample));
    // 樣本被截斷時最後一行可能不完整
    if truncated && lines.len() > 1 {
        lines.pop();
    }

    match pick_consistent(&lines) {
        Some(delimiter) => {
            tracing::debug!(
                "🔎 Sniffed delimiter {:?} over {} sample lines",
                delimiter as char,
                lines.len()
            );
            delimiter
        }
        None => {
            tracing::debug!(
                "🔎 No consistent delimiter in sample, using {:?}",
                DEFAULT_DELIMITER as char
            );
            DEFAULT_DELIMITER
        }
    }
}

/// Counts candidate delimiters outside quoted sections, one entry per
/// non-blank logical line.
///
/// A quote opens a quoted section only at the start of a field, the same rule
/// the csv reader follows, so a stray `"` inside a value is plain text.
fn count_per_line(text: &str) -> Vec<LineCounts> {
    let mut lines = Vec::new();
    let mut current = [0usize; CANDIDATES.len()];
    let mut in_quotes = false;
    let mut quote_closed = false;
    let mut field_start = true;
    let mut has_content = false;

    for c in text.chars() {
        if in_quotes {
            if c == '"' {
                in_quotes = false;
                quote_closed = true;
            }
            continue;
        }

        // `""` 是引號欄位中的跳脫引號
        if c == '"' && (field_start || quote_closed) {
            in_quotes = true;
            quote_closed = false;
            field_start = false;
            has_content = true;
            continue;
        }
        quote_closed = false;

        match c {
            '\n' | '\r' => {
                if has_content {
                    lines.push(current);
                }
                current = [0; CANDIDATES.len()];
                field_start = true;
                has_content = false;
            }
            _ => {
                has_content = true;
                match CANDIDATES.iter().position(|&d| d as char == c) {
                    Some(slot) => {
                        current[slot] += 1;
                        field_start = true;
                    }
                    None => field_start = false,
                }
            }
        }
    }
    if has_content {
        lines.push(current);
    }

    lines
}

/// Share of sampled lines that must repeat the header's count.
const MIN_CONSISTENCY: f64 = 0.9;

/// A candidate qualifies when it appears in the header line and at least
/// [`MIN_CONSISTENCY`] of the lines (header included) carry the same count.
/// The most consistent candidate wins, then the highest count, then the
/// earlier candidate.
fn pick_consistent(lines: &[LineCounts]) -> Option<u8> {
    let header = lines.first()?;
    let mut best: Option<(usize, usize, usize)> = None;

    for slot in 0..CANDIDATES.len() {
        let count = header[slot];
        if count == 0 {
            continue;
        }
        let matching = lines.iter().filter(|line| line[slot] == count).count();
        if (matching as f64) < MIN_CONSISTENCY * lines.len() as f64 {
            continue;
        }
        if best.map_or(true, |(_, best_matching, best_count)| {
            (matching, count) > (best_matching, best_count)
        }) {
            best = Some((slot, matching, count));
        }
    }

    best.map(|(slot, _, _)| CANDIDATES[slot])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semicolon_sample() {
        let data = b"Ad\xc4\xb1;Soyad\xc4\xb1;Kurum\nAy\xc5\x9fe;Y\xc4\xb1lmaz;ACME\nMehmet;Kaya;\n";
        assert_eq!(sniff_delimiter(data, DEFAULT_SAMPLE_SIZE), b';');
    }

    #[test]
    fn test_comma_sample() {
        let data = b"a,b,c\n1,2,3\n4,5,6\n";
        assert_eq!(sniff_delimiter(data, DEFAULT_SAMPLE_SIZE), b',');
    }

    #[test]
    fn test_tab_and_pipe_samples() {
        assert_eq!(sniff_delimiter(b"a\tb\n1\t2\n", DEFAULT_SAMPLE_SIZE), b'\t');
        assert_eq!(sniff_delimiter(b"a|b|c\n1|2|3\n", DEFAULT_SAMPLE_SIZE), b'|');
    }

    #[test]
    fn test_no_pattern_falls_back_to_comma() {
        let data = b"a;b\nc;d;e;f\ng|h\n";
        assert_eq!(sniff_delimiter(data, DEFAULT_SAMPLE_SIZE), DEFAULT_DELIMITER);
        assert_eq!(sniff_delimiter(b"hello world", DEFAULT_SAMPLE_SIZE), DEFAULT_DELIMITER);
        assert_eq!(sniff_delimiter(b"", DEFAULT_SAMPLE_SIZE), DEFAULT_DELIMITER);
    }

    #[test]
    fn test_quoted_delimiters_are_ignored() {
        let data = b"name;note\n\"Doe, Jane\";\"a;b\"\nBob;x\n";
        assert_eq!(sniff_delimiter(data, DEFAULT_SAMPLE_SIZE), b';');
    }

    #[test]
    fn test_truncated_last_line_is_dropped() {
        // a 15-byte sample cuts the third line after "4;5"
        assert_eq!(sniff_delimiter(b"a;b;c\n1;2;3\n4;5;6\n", 15), b';');

        // the same short line in a complete file is a real inconsistency
        assert_eq!(sniff_delimiter(b"a;b;c\n1;2;3\n4;5", DEFAULT_SAMPLE_SIZE), DEFAULT_DELIMITER);
    }

    #[test]
    fn test_one_short_row_is_tolerated() {
        let mut data = b"Ad\xc4\xb1;Soyad\xc4\xb1;Birinci e-posta;Notlar\n".to_vec();
        for i in 0..10 {
            data.extend(format!("Ki\u{15f}i{};Soyad;k{}@example.com;not\n", i, i).bytes());
        }
        data.extend(b"Eksik;Soyad;eksik@example.com\n");
        assert_eq!(sniff_delimiter(&data, DEFAULT_SAMPLE_SIZE), b';');
    }

    #[test]
    fn test_stray_quote_inside_value_is_plain_text() {
        let data = b"name;size;note\nfloppy;3.5\" disk;x\nzip;100;y\nhdd;1;z\n";
        assert_eq!(count_per_line(&decode_sample(data)).len(), 4);
        assert_eq!(sniff_delimiter(data, DEFAULT_SAMPLE_SIZE), b';');
    }

    #[test]
    fn test_escaped_quotes_stay_inside_the_field() {
        let data = b"name;note\n\"say \"\"a;b\"\"\";x\nBob;y\n";
        assert_eq!(sniff_delimiter(data, DEFAULT_SAMPLE_SIZE), b';');
    }

    #[test]
    fn test_sniff_does_not_need_the_whole_buffer() {
        let mut data = b"x;y\n1;2\n".to_vec();
        data.extend(std::iter::repeat(b'z').take(4096));
        assert_eq!(sniff_delimiter(&data, 8), b';');
    }
}

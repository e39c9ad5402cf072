/// Decodes a percent-encoded string (`%XX`) and converts `+` to space.
///
/// Decoded bytes are reassembled as UTF-8, so multi-byte characters survive;
/// invalid sequences become U+FFFD.
pub fn url_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                let hi = (bytes[i + 1] as char).to_digit(16);
                let lo = (bytes[i + 2] as char).to_digit(16);
                match (hi, lo) {
                    (Some(h), Some(l)) => {
                        out.push(((h << 4) | l) as u8);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Parses `key=value&key2=value2` into a `Vec` of `(key, value)` pairs.
/// Empty segments (`a=1&&b=2`) are skipped.
pub fn parse_form(body: &str) -> Vec<(String, String)> {
    body.split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let mut it = pair.splitn(2, '=');
            let k = it.next()?;
            let v = it.next().unwrap_or("");
            Some((url_decode(k), url_decode(v)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_plus_and_percent() {
        assert_eq!(url_decode("a+b%20c"), "a b c");
        assert_eq!(url_decode("28%2E5"), "28.5");
    }

    #[test]
    fn keeps_malformed_escapes() {
        assert_eq!(url_decode("100%"), "100%");
        assert_eq!(url_decode("%zz"), "%zz");
        assert_eq!(url_decode("%4"), "%4");
    }

    #[test]
    fn decodes_multibyte_utf8() {
        assert_eq!(url_decode("caf%C3%A9"), "café");
    }

    #[test]
    fn parses_pairs_in_order() {
        let pairs = parse_form("age=27&cycle_length=28.5&&empty=&flag");
        assert_eq!(
            pairs,
            vec![
                ("age".to_owned(), "27".to_owned()),
                ("cycle_length".to_owned(), "28.5".to_owned()),
                ("empty".to_owned(), String::new()),
                ("flag".to_owned(), String::new()),
            ]
        );
    }
}

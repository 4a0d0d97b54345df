use xmlpretty::{Document, FormatOptions, StyleResolver, strip_sgr};

const SRC: &str = include_str!("good.xml");
const CMP: &str = include_str!("good.xml.formatted");

fn assert_same_lines(got: &str, expected: &str) {
    if got == expected {
        return;
    }

    let mut got_lines = got.lines();
    for (i, line) in expected.lines().enumerate() {
        match got_lines.next() {
            None => {
                panic!(
                    "Diff at line {}: Not enough rows in formatted document!",
                    i + 1
                );
            }

            Some(l) => {
                if line == l {
                    continue;
                } else {
                    eprintln!("Diff at line {}", i + 1);

                    eprintln!("Expected: {line}");
                    eprintln!("Got: {l}");
                    break;
                }
            }
        }
    }

    panic!("Formatted document does not match expected output");
}

#[test]
fn test_good() {
    let document = match Document::parse(SRC) {
        Ok(doc) => doc,
        Err(e) => panic!("{e}"),
    };

    let mut formatted = document.to_pretty(&FormatOptions::default()).unwrap();
    formatted.push('\n');
    assert_same_lines(&formatted, CMP);
}

#[test]
fn test_good_decorated() {
    let document = match Document::parse(SRC) {
        Ok(doc) => doc,
        Err(e) => panic!("{e}"),
    };

    let options = FormatOptions::new(StyleResolver::decorated());
    let mut formatted = document.to_pretty(&options).unwrap();
    assert!(formatted.contains('\x1b'));

    formatted = strip_sgr(&formatted);
    formatted.push('\n');
    assert_same_lines(&formatted, CMP);
}

#[test]
fn test_good_is_deterministic() {
    let document = Document::parse(SRC).unwrap();
    let first = document.to_lines(&FormatOptions::default()).unwrap();
    let second = document.to_lines(&FormatOptions::default()).unwrap();
    assert_eq!(first, second);
}

//! Offset and partition properties of region extraction.

use stylescope::core::{Dialect, Language};
use stylescope::document::LineIndex;
use stylescope::embedded::extract;

const DOCUMENTS: &[&str] = &[
    "",
    "<div>no styles</div>",
    "<template><div>hi</div></template><style lang=\"scss\">$a: red;</style>",
    "<template>\r\n  <p style=\"color: red; margin: 0\">héllo</p>\r\n</template>\r\n<style>\r\n:root { --c: #fff; }\r\n</style>\r\n",
    "<style lang='less'>\n@a: 1;\n</style>\n<style lang=\"scss\" scoped>\n$b: 2;\n</style>\n<style>\n:root{--c:3}\n</style>",
    "<script>const s = '<style>not css</style>';</script><style lang=less>@x: 1;</style>",
    "<!-- <style>.commented{}</style> --><p style='a:b'>ü</p><style lang=\"sass\">$s: 1</style>",
    "<p style=\"x:y\"></p><span\nstyle=\"z:w\"></span>",
    "<style lang=\"less\">@unterminated: 1;",
    "<p style=\"\">empty</p><style></style>",
];

#[test]
fn test_projection_preserves_length_and_lines() {
    for text in DOCUMENTS {
        let model = extract(text);
        let lines = LineIndex::new(text);

        for dialect in Dialect::ALL {
            for ignore in [false, true] {
                let projection = model.project(dialect, ignore);
                assert_eq!(projection.len(), text.len(), "{dialect} {ignore} {text:?}");
                assert_eq!(
                    LineIndex::new(&projection).line_starts(),
                    lines.line_starts(),
                    "{dialect} {ignore} {text:?}"
                );
                for (i, (&p, &t)) in projection.as_bytes().iter().zip(text.as_bytes()).enumerate() {
                    if t == b'\n' || t == b'\r' {
                        assert_eq!(p, t, "newline at {i} in {text:?}");
                    }
                }
            }
        }
    }
}

#[test]
fn test_projection_copies_matching_regions_only() {
    for text in DOCUMENTS {
        let model = extract(text);
        for dialect in Dialect::ALL {
            let projection = model.project(dialect, true).into_bytes();
            let mut inside = vec![false; text.len()];
            for region in model.regions() {
                if region.dialect == dialect && !region.is_attribute_value {
                    assert_eq!(&projection[region.start..region.end], &text.as_bytes()[region.start..region.end]);
                    inside[region.start..region.end].iter_mut().for_each(|b| *b = true);
                }
            }
            for (i, &byte) in projection.iter().enumerate() {
                if !inside[i] {
                    assert!(matches!(byte, b' ' | b'\n' | b'\r'), "byte {i} of {dialect} in {text:?}");
                }
            }
        }
    }
}

#[test]
fn test_attribute_values_are_wrapped_for_css() {
    let text = "<p style=\"color: red\"></p>";
    let projection = extract(text).project(Dialect::Css, false);
    let start = text.find("color").unwrap();

    assert_eq!(projection.len(), text.len());
    assert_eq!(&projection[start - 3..start], "__{");
    assert_eq!(&projection[start..start + "color: red".len()], "color: red");
    assert_eq!(&projection[start + "color: red".len()..][..1], "}");
}

#[test]
fn test_regions_partition_document() {
    for text in DOCUMENTS {
        let model = extract(text);

        let regions = model.regions();
        for pair in regions.windows(2) {
            assert!(pair[0].end <= pair[1].start, "overlap in {text:?}");
        }
        assert!(regions.iter().all(|r| r.start <= r.end && r.end <= text.len()));

        let ranges = model.language_ranges();
        let mut cursor = 0;
        for range in &ranges {
            assert_eq!(range.start, cursor, "gap in {text:?}");
            cursor = range.end;
        }
        assert_eq!(cursor, text.len());

        for region in regions.iter().filter(|r| r.end > r.start) {
            let middle = region.start + (region.end - region.start) / 2;
            assert_eq!(model.language_at_offset(middle), Language::Style(region.dialect));
        }
    }
}

#[test]
fn test_languages_present_in_region_order() {
    let model = extract(DOCUMENTS[4]);
    assert_eq!(model.languages_present(), vec![Dialect::Less, Dialect::Scss, Dialect::Css]);

    let model = extract(DOCUMENTS[5]);
    assert_eq!(model.languages_present(), vec![Dialect::Less]);

    let model = extract(DOCUMENTS[1]);
    assert!(model.languages_present().is_empty());
    assert_eq!(model.language_at_offset(3), Language::Host);
}

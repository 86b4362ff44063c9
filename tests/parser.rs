use strict_json::{parse, Value};

#[test]
fn parse_basics() {
    let data = r#"
    {
        "hello": "wolrd",
        "vec": [
            {
        "num1": 1,
        "num2": 1.2,
        "num4": -12
    }
        ],
    "is": false,
    "is_not": true,
    "empty": null
    }
    "#;

    let value = parse(data).unwrap();

    assert_eq!(value.len(), Some(5));
    assert_eq!(value.get("hello").unwrap().as_string().unwrap(), "wolrd");

    let inner = value.get("vec").unwrap().at(0).unwrap();
    assert_eq!(inner.get("num2").unwrap().as_number().unwrap(), 1.2);
    assert_eq!(inner.get("num4").unwrap().as_number().unwrap(), -12.0);

    assert!(!value.get("is").unwrap().as_boolean().unwrap());
    assert!(value.get("empty").unwrap().is_null());
}

mod literal {
    use strict_json::{error::Kind, parse};

    #[test]
    fn null() {
        assert!(parse("null").unwrap().is_null());
    }

    #[test]
    fn booleans() {
        assert!(parse("true").unwrap().as_boolean().unwrap());
        assert!(!parse("false").unwrap().as_boolean().unwrap());
    }

    #[test]
    fn literals_are_case_sensitive() {
        let err = parse("TRUE").unwrap_err();
        assert_eq!(err.kind, Kind::UnexpectedChar('T'));

        let err = parse("NULL").unwrap_err();
        assert_eq!(err.kind, Kind::UnexpectedChar('N'));
    }

    #[test]
    fn partial_literal() {
        assert_eq!(parse("nul").unwrap_err().kind, Kind::InvalidLiteral("null"));
        assert_eq!(parse("fals").unwrap_err().kind, Kind::InvalidLiteral("false"));
        assert_eq!(parse("tru e").unwrap_err().kind, Kind::InvalidLiteral("true"));
    }

    #[test]
    fn unknown_literal() {
        assert_eq!(parse("undefined").unwrap_err().kind, Kind::UnexpectedChar('u'));
    }
}

mod string {
    use strict_json::{error::Kind, parse};

    #[test]
    fn plain_strings() {
        assert_eq!(parse("\"\"").unwrap().as_string().unwrap(), "");
        assert_eq!(parse("\"hello\"").unwrap().as_string().unwrap(), "hello");
        assert_eq!(
            parse("\"hello, world!\"").unwrap().as_string().unwrap(),
            "hello, world!"
        );
    }

    #[test]
    fn backslashes_are_kept() {
        let data = r#"{"foo\u0000bar": "a\nb"}"#;

        let parsed = parse(data).unwrap();
        let object = parsed.as_object().unwrap();

        assert_eq!(
            object.get(r#"foo\u0000bar"#).unwrap().as_string().unwrap(),
            r#"a\nb"#
        );
    }

    #[test]
    fn unterminated() {
        let err = parse("\"never closed").unwrap_err();

        assert_eq!(err.kind, Kind::MissingQuote);
        assert_eq!(err.line, 1);
    }

    #[test]
    fn multibyte_content() {
        assert_eq!(parse("\"héllo ✓\"").unwrap().as_string().unwrap(), "héllo ✓");
    }
}

mod number {
    use strict_json::{error::Kind, parse};

    fn num(s: &str) -> f64 {
        parse(s).unwrap().as_number().unwrap()
    }

    #[test]
    fn integers_and_fractions() {
        assert_eq!(num("0"), 0.0);
        assert_eq!(num("42"), 42.0);
        assert_eq!(num("-42"), -42.0);
        assert_eq!(num("3.14"), 3.14);
        assert_eq!(num("-3.14"), -3.14);
        assert_eq!(num("0.5"), 0.5);
        assert_eq!(num("-0"), 0.0);
    }

    #[test]
    fn leading_zero() {
        assert_eq!(parse("01").unwrap_err().kind, Kind::LeadingZero);
        assert_eq!(parse("-007").unwrap_err().kind, Kind::LeadingZero);
    }

    #[test]
    fn bare_dots() {
        assert_eq!(parse("1.").unwrap_err().kind, Kind::MissingFraction);
        assert_eq!(parse(".5").unwrap_err().kind, Kind::UnexpectedChar('.'));
    }

    #[test]
    fn lone_minus() {
        assert!(matches!(
            parse("-").unwrap_err().kind,
            Kind::InvalidNumber(_)
        ));
        assert!(matches!(
            parse("[-x]").unwrap_err().kind,
            Kind::InvalidNumber(_)
        ));
    }

    #[test]
    fn out_of_range() {
        let huge = format!("1{}", "0".repeat(400));

        let err = parse(&huge).unwrap_err();
        assert_eq!(err.kind, Kind::InvalidNumber(huge.clone()));
        assert_eq!(err.line, 1);

        assert!(matches!(
            parse(&format!("[-{}]", huge)).unwrap_err().kind,
            Kind::InvalidNumber(_)
        ));
        assert_eq!(num(&format!("1{}", "0".repeat(300))), 1e300);
    }

    #[test]
    fn exponents_are_not_supported() {
        assert_eq!(parse("1e5").unwrap_err().kind, Kind::CharsAfterRoot);
    }
}

mod array {
    use strict_json::{
        error::{Container, Kind},
        parse, Value,
    };

    #[test]
    fn empty() {
        let value = parse("[]").unwrap();

        assert!(value.as_array().unwrap().is_empty());
        assert_eq!(parse("[ \n ]").unwrap(), Value::array(Vec::<Value>::new()));
    }

    #[test]
    fn keeps_order() {
        let value = parse("[1,2,3]").unwrap();

        assert_eq!(value, Value::array([1, 2, 3]));
    }

    #[test]
    fn mixed_and_spaced() {
        let value = parse("[ null , true , 42 , \"text\" ]").unwrap();

        assert!(value.at(0).unwrap().is_null());
        assert!(value.at(1).unwrap().as_boolean().unwrap());
        assert_eq!(value.at(2).unwrap().as_number().unwrap(), 42.0);
        assert_eq!(value.at(3).unwrap().as_string().unwrap(), "text");
    }

    #[test]
    fn nested() {
        let value = parse("[[1,2],[3,4]]").unwrap();

        assert_eq!(value.at(1).unwrap().at(1).unwrap().as_number().unwrap(), 4.0);
    }

    #[test]
    fn comma_strictness() {
        assert_eq!(parse("[1,]").unwrap_err().kind, Kind::UnexpectedChar(']'));
        assert_eq!(parse("[,]").unwrap_err().kind, Kind::UnexpectedChar(','));
        assert_eq!(
            parse("[1 2]").unwrap_err().kind,
            Kind::MissingComma(Container::Array)
        );
    }

    #[test]
    fn unclosed() {
        assert_eq!(parse("[").unwrap_err().kind, Kind::UnexpectedEnd);
        assert_eq!(
            parse("[1").unwrap_err().kind,
            Kind::MissingComma(Container::Array)
        );
        assert_eq!(parse("]").unwrap_err().kind, Kind::UnexpectedChar(']'));
    }
}

mod object {
    use strict_json::{
        error::{Container, Kind},
        parse, Value,
    };

    #[test]
    fn empty() {
        let value = parse("{}").unwrap();

        assert!(value.as_object().unwrap().is_empty());
    }

    #[test]
    fn mapping() {
        let value = parse("{\"a\":1,\"b\":true}").unwrap();

        assert_eq!(value.get("a").unwrap().as_number().unwrap(), 1.0);
        assert!(value.get("b").unwrap().as_boolean().unwrap());
        assert_eq!(value, Value::object([("a", Value::from(1)), ("b", Value::from(true))]));
    }

    #[test]
    fn spaced() {
        let value = parse("{ \"a\" : 1 , \"b\" : 2 }").unwrap();

        assert_eq!(value.get("b").unwrap().as_number().unwrap(), 2.0);
    }

    #[test]
    fn duplicate_keys_last_wins() {
        let value = parse("{\"k\":1,\"k\":2}").unwrap();

        assert_eq!(value.len(), Some(1));
        assert_eq!(value.get("k").unwrap().as_number().unwrap(), 2.0);
    }

    #[test]
    fn same_document_parses_equal() {
        assert_eq!(parse("{\"x\":1}").unwrap(), parse("{ \"x\" : 1 }").unwrap());
    }

    #[test]
    fn syntax_errors() {
        assert_eq!(parse("{a:1}").unwrap_err().kind, Kind::InvalidKey);
        assert_eq!(parse("{\"a\" 1}").unwrap_err().kind, Kind::MissingColon);
        assert_eq!(parse("{\"a\":1,}").unwrap_err().kind, Kind::InvalidKey);
        assert_eq!(
            parse("{\"a\":1 \"b\":2}").unwrap_err().kind,
            Kind::MissingComma(Container::Object)
        );
        assert_eq!(parse("{").unwrap_err().kind, Kind::UnexpectedEnd);
        assert_eq!(parse("}").unwrap_err().kind, Kind::UnexpectedChar('}'));
    }
}

mod document {
    use strict_json::{error::Kind, parse, Error};

    #[test]
    fn empty_input() {
        assert_eq!(parse("").unwrap_err().kind, Kind::EmptyInput);
        assert_eq!(parse("  \n\t ").unwrap_err().kind, Kind::EmptyInput);
    }

    #[test]
    fn trailing_content() {
        let err = parse("1 2").unwrap_err();

        assert_eq!(err.kind, Kind::CharsAfterRoot);
        assert_eq!(err.to_string(), "[line:1] Unexpected characters after JSON value.");
    }

    #[test]
    fn surrounding_whitespace() {
        assert!(parse("\r\n  null \t\n").unwrap().is_null());
    }

    #[test]
    fn complex_structure() -> Result<(), Error> {
        let complex = parse(
            r#"{
            "empty_array": [],
            "empty_object": {},
            "numbers": [1, -2, 3.14],
            "nested": {
                "array": [[1, 2], [3, 4]],
                "object": {"a": {"b": 3}}
            },
            "mixed": [
                {"k": "v"},
                [1, 2],
                {"a": [{"b": 1}]}
            ]
        }"#,
        )?;

        assert!(complex.get("empty_array")?.as_array()?.is_empty());
        assert!(complex.get("empty_object")?.as_object()?.is_empty());
        assert_eq!(complex.get("numbers")?.at(2)?.as_number()?, 3.14);
        assert_eq!(
            complex.get("nested")?.get("array")?.at(1)?.at(1)?.as_number()?,
            4.0
        );
        assert_eq!(
            complex.get("mixed")?.at(2)?.get("a")?.at(0)?.get("b")?.as_number()?,
            1.0
        );

        Ok(())
    }
}

mod lines {
    use strict_json::{error::Kind, parse};

    #[test]
    fn error_reports_line() {
        let data = "{\n  \"a\": 1,\n  \"b\": [1, 2\n  3]\n}";

        let err = parse(data).unwrap_err();

        // whitespace after `2` is skipped before the comma is expected
        assert_eq!(err.line, 4);
        assert!(matches!(err.kind, Kind::MissingComma(_)));
    }

    #[test]
    fn carriage_returns_do_not_count() {
        let err = parse("\r\r\n\r@").unwrap_err();

        assert_eq!(err.line, 2);
        assert_eq!(err.kind, Kind::UnexpectedChar('@'));
    }

    #[test]
    fn trailing_garbage_line() {
        let err = parse("[1]\n\n\nx").unwrap_err();

        assert_eq!(err.line, 4);
    }
}

mod roundtrip {
    use super::*;

    #[test]
    fn stringify_parses_back() {
        let built = Value::object([
            ("name", Value::from("demo")),
            ("ratio", Value::from(0.25)),
            ("count", Value::from(-3)),
            ("flags", Value::array([true, false])),
            ("nothing", Value::Null),
            (
                "nested",
                Value::object([("list", Value::array([Value::from(1), Value::array([2.5])]))]),
            ),
        ]);

        let reparsed = parse(&built.stringify()).unwrap();

        assert_eq!(reparsed, built);
    }
}

mod file {
    use std::io::Write;
    use strict_json::{error::Kind, parse_file, parse_file_profiled, Profiler};

    #[test]
    fn reads_and_parses() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"pairs\": [{{\"x0\": 1.5}}]}}").unwrap();

        let value = parse_file(file.path()).unwrap();

        let x0 = value.get("pairs").unwrap().at(0).unwrap().get("x0").unwrap();
        assert_eq!(x0.as_number().unwrap(), 1.5);
    }

    #[test]
    fn missing_file_is_line_zero() {
        let dir = tempfile::tempdir().unwrap();

        let err = parse_file(dir.path().join("missing.json")).unwrap_err();

        assert_eq!(err.line, 0);
        assert!(matches!(err.kind, Kind::Io(_)));
        assert!(err.to_string().starts_with("[line:0] Unable to open file at"));
    }

    #[test]
    fn profiled_records_read_and_parse() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, [2, 3]]").unwrap();

        let profiler = Profiler::new();
        parse_file_profiled(file.path(), &profiler).unwrap();

        let report = profiler.report();

        assert_eq!(report.anchor("read file").map(|a| a.bytes), Some(11));
        assert_eq!(report.anchor("parse").map(|a| a.hits), Some(1));
        // root array, 1, inner array, 2, 3
        assert_eq!(report.anchor("parse_value").map(|a| a.hits), Some(5));
    }
}

#[cfg(test)]
mod tests {
    use crate::{codec::*, val::Dict, EelError, Value};

    fn sample_values() -> Vec<Value> {
        let mut dict = Dict::new();
        dict.insert(Value::string("name"), Value::string("eel, the fish: \u{1F41F}"));
        dict.insert(Value::from(1), Value::List(vec![Value::Bool(true), Value::from(-2.25)]));

        vec![
            Value::from(0),
            Value::from(-42),
            Value::from(i64::MAX),
            Value::from(3.0),
            Value::from(1e-7),
            Value::from(f64::INFINITY),
            Value::string(""),
            Value::string("hello, world!@"),
            Value::Bool(true),
            Value::Bool(false),
            Value::List(vec![]),
            Value::List(vec![
                Value::from(1),
                Value::string("a,b"),
                Value::List(vec![Value::string("nested")]),
            ]),
            Value::Dict(Dict::new()),
            Value::Dict(dict),
        ]
    }

    #[test]
    fn representation_round_trips() -> anyhow::Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();

        for v in sample_values() {
            let text = encode_repr(&v);
            let back = decode_literal_or_repr(&CORE_TYPES, &text)?;
            assert_eq!(back, v, "round trip of {text}");
            assert_eq!(back.kind(), v.kind());
        }
        Ok(())
    }

    #[test]
    fn floats_stay_floats_across_the_wire() -> anyhow::Result<()> {
        let back = decode_repr(&CORE_TYPES, &encode_repr(&Value::from(3.0)))?;
        assert!(matches!(back, Value::Number(n) if !n.is_int()));
        Ok(())
    }

    #[test]
    fn literal_form_is_lossy_for_strings_with_commas() -> anyhow::Result<()> {
        let text = encode_literal(&Value::string("a,b"))?;
        assert_eq!(decode_literal(&CORE_TYPES, &text)?, Value::string("a,b"));

        let list = decode_literal(&CORE_TYPES, &format!("lst@{text}"))?;
        assert_eq!(list, Value::List(vec![Value::string("a"), Value::string("b")]));
        Ok(())
    }

    #[test]
    fn literal_numbers_match_repr_numbers() -> anyhow::Result<()> {
        assert_eq!(decode_literal_or_repr(&CORE_TYPES, "num@12")?, Value::from(12));
        assert_eq!(decode_literal_or_repr(&CORE_TYPES, "num!12")?, Value::from(12));
        assert_eq!(decode_literal_or_repr(&CORE_TYPES, "num@1.5")?, Value::from(1.5));
        Ok(())
    }

    #[test]
    fn nested_container_items_must_be_representations() {
        // the list payload holds base64 of "hello", which has no marker
        let err = decode_repr(&CORE_TYPES, "lst!aGVsbG8=").unwrap_err();
        assert!(matches!(err, EelError::NotAnEelRepr(_)));
    }
}

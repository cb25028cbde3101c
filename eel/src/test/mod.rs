#[cfg(test)]
mod tests {
    use std::io::{empty, Cursor};

    use eel_core::{encode_repr, EelError, Value, CORE_TYPES};

    use crate::{stdlib, Context};

    fn run_with_input(input: &str, name: &str, args: &[&str]) -> Result<String, EelError> {
        let _ = env_logger::builder().is_test(true).try_init();

        let commands = stdlib::registry()?;
        let mut input = Cursor::new(input.to_owned());
        let mut ctx = Context::new(&CORE_TYPES, &mut input);
        let result = commands.invoke(&mut ctx, name, args)?;
        Ok(encode_repr(&result))
    }

    fn run(name: &str, args: &[&str]) -> Result<String, EelError> {
        run_with_input("", name, args)
    }

    #[test]
    fn arith_adds_encoded_numbers() -> anyhow::Result<()> {
        assert_eq!(run("arith", &["num!3", "str@+", "num!4"])?, "num!7");
        assert_eq!(run("arith", &["num!3", "plus", "num@4"])?, "num!7");
        assert_eq!(run("arith", &["num!7", "/", "num!2"])?, "num!3.5");
        assert_eq!(run("arith", &["num!-7", "//", "num!2"])?, "num!-4");
        assert_eq!(run("arith", &["num!2", "**", "num!10"])?, "num!1024");
        assert_eq!(run("arith", &["num!5", ">=", "num!3"])?, "bol!true");
        Ok(())
    }

    #[test]
    fn arith_rejects_non_arithmetic_left_operand() {
        let err = run("arith", &["hello", "+", "num!1"]).unwrap_err();
        assert_eq!(
            err,
            EelError::Type("arith on arg#0: expected Arithmetic, got String".into())
        );
    }

    #[test]
    fn arith_rejects_mixed_kinds_and_unknown_operators() {
        assert!(matches!(
            run("arith", &["num!1", "+", "str@1"]),
            Err(EelError::InvalidOperation(_))
        ));
        assert!(matches!(
            run("arith", &["num!1", "<>", "num!1"]),
            Err(EelError::InvalidOperation(_))
        ));
        assert!(matches!(
            run("arith", &["num!1", "and", "num!1"]),
            Err(EelError::InvalidOperation(_))
        ));
    }

    #[test]
    fn comp_and_not_work_on_any_kind() -> anyhow::Result<()> {
        assert_eq!(run("comp", &["abc", "==", "str@abc"])?, "bol!true");
        assert_eq!(run("comp", &["str@", "or", "num!5"])?, "num!5");
        assert_eq!(run("comp", &["num!0", "and", "str@x"])?, "num!0");
        assert_eq!(run("not", &["lst@"])?, "bol!true");
        assert!(run("comp", &["num!1", "+", "num!1"]).is_err());
        Ok(())
    }

    #[test]
    fn to_num_reads_stdin_without_an_argument() -> anyhow::Result<()> {
        assert_eq!(run_with_input("42\n", "to_num", &[])?, "num!42");
        assert_eq!(run_with_input("num@2.5", "to_num", &[])?, "num!2.5");
        assert_eq!(run("to_num", &["str@12"])?, "num!12");
        assert_eq!(run("to_num", &["bol!true"])?, "num!1");
        assert!(run("to_num", &["lst@1"]).is_err());
        Ok(())
    }

    #[test]
    fn pipe_in_sentinel_feeds_stdin_to_an_argument() -> anyhow::Result<()> {
        assert_eq!(
            run_with_input("hello", "to_str", &["@"])?,
            encode_repr(&Value::string("hello"))
        );
        assert_eq!(run("to_str", &["@@x"])?, encode_repr(&Value::string("@x")));
        Ok(())
    }

    #[test]
    fn conversions_report_kinds() -> anyhow::Result<()> {
        assert_eq!(
            run("to_list", &["str@ab"])?,
            encode_repr(&Value::List(vec![Value::string("a"), Value::string("b")]))
        );
        assert_eq!(run("to_bool", &["str@"])?, "bol!false");
        let err = run("to_dict", &["num!1"]).unwrap_err();
        assert_eq!(err.to_string(), "Cannot convert type Number to Dictionary");
        Ok(())
    }

    #[test]
    fn sequence_commands() -> anyhow::Result<()> {
        assert_eq!(run("len", &["lst@1,2,3"])?, "num!3");
        assert_eq!(run("contains", &["dic@a=1", "a"])?, "bol!true");
        assert_eq!(run("contains", &["hello", "ell"])?, "bol!true");
        assert!(matches!(run("len", &["num!1"]), Err(EelError::Type(_))));
        Ok(())
    }

    #[test]
    fn from_file_defaults_to_stdin_and_reports_missing_files() -> anyhow::Result<()> {
        assert_eq!(
            run_with_input("contents", "from_file", &[])?,
            encode_repr(&Value::string("contents"))
        );
        assert!(matches!(
            run("from_file", &["/definitely/not/here.txt"]),
            Err(EelError::File(_))
        ));
        Ok(())
    }

    #[test]
    fn unknown_command_and_bad_arity() {
        assert_eq!(
            run("nope", &[]).unwrap_err(),
            EelError::CommandNotFound("nope".into())
        );
        assert!(matches!(run("arith", &["num!1"]), Err(EelError::Argument(_))));
    }

    #[test]
    fn every_command_registers_once() -> anyhow::Result<()> {
        let commands = stdlib::registry()?;
        assert_eq!(commands.names().len(), stdlib::COMMANDS.len());

        let mut input = empty();
        let mut ctx = Context::new(&CORE_TYPES, &mut input);
        assert!(commands.invoke(&mut ctx, "len", &["str@abc"]).is_ok());
        Ok(())
    }
}

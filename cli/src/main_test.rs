mod tests {
    use crate::*;

    #[test]
    fn test_no_args_selects_every_matrix() {
        let args = CliArgs::try_parse_from(["parsweep"]).expect("should parse");
        assert!(args.command.is_none());
        let plans = select_plans(&args.run).expect("builtin plans");
        let names: Vec<&str> = plans.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["general", "crturn"]);
        assert!(plans.iter().all(|p| p.repetitions == 5));
    }

    #[test]
    fn test_matrix_and_repetition_override() {
        let args = CliArgs::try_parse_from(["parsweep", "--matrix", "crturn", "--repetitions", "2"])
            .expect("should parse");
        let plans = select_plans(&args.run).expect("plans");
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].name, "crturn");
        assert_eq!(plans[0].invocation_count(), 4);
    }

    #[test]
    fn test_zero_repetitions_rejected_before_running() {
        let args = CliArgs::try_parse_from(["parsweep", "--repetitions", "0"]).expect("should parse");
        let err = select_plans(&args.run).unwrap_err();
        assert!(err.to_string().contains("repetition count"));
    }

    #[test]
    fn test_unknown_matrix_is_parse_error() {
        let err = CliArgs::try_parse_from(["parsweep", "--matrix", "skiplist"]).unwrap_err();
        assert!(err.to_string().contains("unknown matrix"));
    }

    #[test]
    fn test_config_conflicts_with_matrix() {
        let res = CliArgs::try_parse_from(["parsweep", "--matrix", "general", "--config", "plan.toml"]);
        assert!(res.is_err());
    }

    #[test]
    fn test_show_defaults_to_general() {
        let args = CliArgs::try_parse_from(["parsweep", "show"]).expect("should parse");
        match args.command {
            Some(Commands::Show { matrix }) => assert_eq!(matrix, Matrix::General),
            other => panic!("expected show command, got {:?}", other),
        }
    }

    #[test]
    fn test_filter_expr_from_toggles() {
        assert_eq!(filter_expr_from("1"), None);
        assert_eq!(filter_expr_from(" on "), None);
        assert_eq!(filter_expr_from("parsweep_core=debug"), Some("parsweep_core=debug".to_string()));
    }

    #[test]
    fn test_repetition_override_applies_before_validation() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("plan.toml");
        let mut plan = parsweep_core::matrices::crturn().expect("builtin plan");
        plan.repetitions = 0;
        std::fs::write(&path, plan.to_toml_string().expect("serialize")).expect("write plan");
        let path = path.to_str().expect("utf8 path");

        let args = CliArgs::try_parse_from(["parsweep", "--config", path]).expect("should parse");
        assert!(select_plans(&args.run).is_err());

        let args = CliArgs::try_parse_from(["parsweep", "--config", path, "--repetitions", "2"]).expect("should parse");
        let plans = select_plans(&args.run).expect("override makes the plan valid");
        assert_eq!(plans[0].repetitions, 2);
    }

    #[test]
    fn test_base_dir_flag() {
        let args = CliArgs::try_parse_from(["parsweep", "--base-dir", "/opt/parharness/scripts"]).expect("should parse");
        assert_eq!(args.run.base_dir, Some(PathBuf::from("/opt/parharness/scripts")));
    }
}

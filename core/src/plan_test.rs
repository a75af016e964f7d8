#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::{ExperimentKind, SubjectList, SweepAxis, SweepPlan};

    fn small_plan() -> SweepPlan {
        let mut axes = BTreeMap::new();
        axes.insert("general".to_string(), SweepAxis::new(vec![1, 2]).expect("axis"));
        let experiments = vec![
            ExperimentKind::new("hashmap", "general", 1, 3).output("out/a.csv"),
            ExperimentKind::new("list", "general", 2, 3).output("out/b.csv"),
        ];
        SweepPlan::new("small", 2, experiments, axes, SubjectList::new(["NIL"]).expect("subjects"))
    }

    #[test]
    fn test_valid_plan_passes() {
        let plan = small_plan();
        plan.validate().expect("plan should validate");
        assert_eq!(plan.invocation_count(), 4);
    }

    #[test]
    fn test_rejects_zero_repetitions() {
        let plan = small_plan().with_repetitions(0);
        let err = plan.validate().unwrap_err();
        assert!(err.to_string().contains("repetition count"));
    }

    #[test]
    fn test_rejects_empty_experiments() {
        let mut plan = small_plan();
        plan.experiments.clear();
        let err = plan.validate().unwrap_err();
        assert!(err.to_string().contains("no experiments"));
    }

    #[test]
    fn test_rejects_unknown_family() {
        let mut plan = small_plan();
        plan.experiments
            .push(ExperimentKind::new("crturn-queue", "queue", 11, 3).output("out/c.csv"));
        let err = plan.validate().unwrap_err();
        assert!(err.to_string().contains("unknown sweep axis family 'queue'"));
    }

    #[test]
    fn test_rejects_shared_output() {
        let mut plan = small_plan();
        plan.experiments[1].output = "out/a.csv".into();
        let err = plan.validate().unwrap_err();
        assert!(err.to_string().contains("shared by more than one experiment"));
    }

    #[test]
    fn test_rejects_bad_run_id_key() {
        let mut plan = small_plan();
        plan.harness.run_id_key = "a=b".to_string();
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_toml_plan_uses_harness_defaults() {
        let plan = SweepPlan::from_toml_str(
            r#"
            name = "smoke"
            repetitions = 2
            subjects = ["NIL", "RCU"]

            [harness]
            iterations = 1

            [axes]
            general = [1, 12, 24]

            [[experiments]]
            name = "hashmap"
            family = "general"
            selector = 1
            mode = 3
            output = "data/smoke/hashmap.csv"

            [[experiments]]
            name = "hashmap"
            family = "general"
            selector = 1
            mode = 3
            count_retired = true
            output = "data/smoke/hashmap_retired.csv"
            "#,
        )
        .expect("plan should parse");

        assert_eq!(plan.name, "smoke");
        assert_eq!(plan.harness.iterations, 1);
        assert_eq!(plan.harness.epoch_freq, 110);
        assert_eq!(plan.harness.command, "metacmd.py");
        assert_eq!(plan.axes["general"].levels(), &[1, 12, 24]);
        assert!(!plan.experiments[0].count_retired);
        assert!(plan.experiments[1].count_retired);
    }

    #[test]
    fn test_toml_plan_is_validated() {
        let err = SweepPlan::from_toml_str(
            r#"
            repetitions = 1
            subjects = ["NIL"]

            [axes]
            general = []

            [[experiments]]
            name = "list"
            family = "general"
            selector = 2
            mode = 2
            output = "list.csv"
            "#,
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("axis 'general'"));
    }

    #[test]
    fn test_toml_round_trip_of_builtin_plan() {
        let plan = crate::matrices::crturn().expect("builtin plan");
        let text = plan.to_toml_string().expect("serialize");
        let parsed = SweepPlan::from_toml_str(&text).expect("reparse");
        assert_eq!(parsed, plan);
    }

    #[test]
    fn test_rejects_shared_output_with_different_spelling() {
        let mut plan = small_plan();
        plan.experiments[1].output = "./out/a.csv".into();
        let err = plan.validate().unwrap_err();
        assert!(err.to_string().contains("shared by more than one experiment"));

        plan.experiments[1].output = "out/tmp/../a.csv".into();
        assert!(plan.validate().is_err());

        plan.experiments[1].output = "../out/a.csv".into();
        plan.validate().expect("parent directory output is a different file");
    }

    #[test]
    fn test_normalize_output_is_lexical() {
        use std::path::PathBuf;

        use crate::plan::normalize_output;

        assert_eq!(normalize_output("./data/final/a.csv".as_ref()), PathBuf::from("data/final/a.csv"));
        assert_eq!(normalize_output("data/x/../final/a.csv".as_ref()), PathBuf::from("data/final/a.csv"));
        assert_eq!(normalize_output("../a.csv".as_ref()), PathBuf::from("../a.csv"));
        assert_eq!(normalize_output("/../a.csv".as_ref()), PathBuf::from("/a.csv"));
    }
}

//! # Planner Unit Tests / 计划模块单元测试
//!
//! Tests for axis resolution, filtering, cell enumeration and command templates.
//!
//! 轴解析、过滤、单元格枚举和命令模板的测试。

mod common;

use bench_matrix::config::parse_matrix_config;
use bench_matrix::core::planner::{AxisFilter, CommandTemplate, plan_matrix};
use bench_matrix::models::{BenchmarkId, Cell, ConfigId};
use common::{plan, setup_benchmark_tree};
use std::path::PathBuf;

#[cfg(test)]
mod axis_tests {
    use super::*;

    #[test]
    fn test_discovers_benchmarks_sorted_without_excluded_entries() {
        let tree = setup_benchmark_tree(&["swaptions", "blackscholes", "kmeans"]);
        let config = parse_matrix_config(r#"configs = ["pthread"]"#).unwrap();

        let plan = plan_matrix(&config, tree.path(), &AxisFilter::default()).unwrap();
        let names: Vec<&str> = plan.benchmarks.iter().map(|b| b.as_str()).collect();

        assert_eq!(names, vec!["blackscholes", "kmeans", "swaptions"]);
    }

    #[test]
    fn test_plain_files_are_not_benchmarks() {
        let tree = setup_benchmark_tree(&["canneal", "dedup"]);
        let tests_dir = tree.path().join("tests");
        std::fs::write(tests_dir.join("run.py"), "print('run')\n").unwrap();
        std::fs::write(tests_dir.join("runmem.py"), "print('runmem')\n").unwrap();
        let config = parse_matrix_config(r#"configs = ["pthread"]"#).unwrap();

        let plan = plan_matrix(&config, tree.path(), &AxisFilter::default()).unwrap();
        let names: Vec<&str> = plan.benchmarks.iter().map(|b| b.as_str()).collect();

        assert_eq!(names, vec!["canneal", "dedup"]);
    }

    #[test]
    fn test_explicit_list_keeps_its_order() {
        let tree = setup_benchmark_tree(&[]);
        let config = parse_matrix_config(
            r#"
            benchmarks = ["x264", "dedup", "ferret"]
            configs = ["pthread", "doubletake"]
            "#,
        )
        .unwrap();

        let plan = plan_matrix(&config, tree.path(), &AxisFilter::default()).unwrap();
        let names: Vec<&str> = plan.benchmarks.iter().map(|b| b.as_str()).collect();
        assert_eq!(names, vec!["x264", "dedup", "ferret"]);
    }

    #[test]
    fn test_missing_benchmark_dir_is_error() {
        let tree = setup_benchmark_tree(&[]);
        let config = parse_matrix_config(
            r#"
            benchmarks_dir = "does-not-exist"
            configs = ["pthread"]
            "#,
        )
        .unwrap();
        assert!(plan_matrix(&config, tree.path(), &AxisFilter::default()).is_err());
    }

    #[test]
    fn test_empty_listing_is_error() {
        let tree = setup_benchmark_tree(&[]);
        let config = parse_matrix_config(r#"configs = ["pthread"]"#).unwrap();
        assert!(plan_matrix(&config, tree.path(), &AxisFilter::default()).is_err());
    }

    #[test]
    fn test_filters_keep_configured_order() {
        let tree = setup_benchmark_tree(&[]);
        let config = parse_matrix_config(
            r#"
            benchmarks = ["a", "b", "c"]
            configs = ["x", "y", "z"]
            "#,
        )
        .unwrap();
        let filter = AxisFilter {
            benchmarks: Some(vec!["c".to_string(), "a".to_string()]),
            configs: Some(vec!["z".to_string(), "x".to_string()]),
        };

        let plan = plan_matrix(&config, tree.path(), &filter).unwrap();
        let benches: Vec<&str> = plan.benchmarks.iter().map(|b| b.as_str()).collect();
        let configs: Vec<&str> = plan.configs.iter().map(|c| c.as_str()).collect();
        assert_eq!(benches, vec!["a", "c"]);
        assert_eq!(configs, vec!["x", "z"]);
    }

    #[test]
    fn test_unknown_filter_entry_is_error() {
        let tree = setup_benchmark_tree(&[]);
        let config = parse_matrix_config(
            r#"
            benchmarks = ["a"]
            configs = ["x"]
            "#,
        )
        .unwrap();
        let filter = AxisFilter {
            benchmarks: None,
            configs: Some(vec!["nope".to_string()]),
        };
        assert!(plan_matrix(&config, tree.path(), &filter).is_err());
    }
}

#[cfg(test)]
mod cell_tests {
    use super::*;

    #[test]
    fn test_cells_are_row_major() {
        let plan = plan(&["a", "b"], &["x", "y"], 1);
        let cells: Vec<String> = plan.cells().map(|c| c.to_string()).collect();
        assert_eq!(cells, vec!["a.x", "a.y", "b.x", "b.y"]);
        assert_eq!(plan.cell_count(), 4);
    }
}

#[cfg(test)]
mod command_template_tests {
    use super::*;

    #[test]
    fn test_default_style_command() {
        let template = CommandTemplate::new(
            "make",
            vec!["eval-{config}".to_string(), "NCORES={cores}".to_string()],
            PathBuf::from("/work/tests"),
            8,
        )
        .unwrap();
        let cell = Cell::new(BenchmarkId::from("kmeans"), ConfigId::from("pthread"));
        let spec = template.for_cell(&cell);

        assert_eq!(spec.program, "make");
        assert_eq!(spec.args, vec!["eval-pthread", "NCORES=8"]);
        assert_eq!(spec.working_dir, PathBuf::from("/work/tests/kmeans"));
        assert_eq!(spec.to_string(), "make eval-pthread NCORES=8");
    }

    #[test]
    fn test_tool_with_arguments_and_quotes() {
        let template = CommandTemplate::new(
            "make -s 'QUIET=1'",
            vec!["{benchmark}-{config}".to_string()],
            PathBuf::from("/b"),
            2,
        )
        .unwrap();
        let cell = Cell::new(BenchmarkId::from("dedup"), ConfigId::from("dthread"));
        let spec = template.for_cell(&cell);

        assert_eq!(spec.args, vec!["-s", "QUIET=1", "dedup-dthread"]);
    }

    #[test]
    fn test_unbalanced_quotes_rejected() {
        assert!(CommandTemplate::new("make 'oops", vec![], PathBuf::from("/b"), 1).is_err());
    }
}

//! # Models Module Unit Tests / Models 模块单元测试
//!
//! Tests for cells, cell results and the report table.
//!
//! 单元格、单元格结果和报告表格的测试。

use bench_matrix::models::{
    AggregateStat, BenchmarkId, Cell, CellResults, ConfigId, NOT_COMPLETED, ReportTable, RunResult,
};
use std::time::Duration;

fn cell(bench: &str, config: &str) -> Cell {
    Cell::new(BenchmarkId::from(bench), ConfigId::from(config))
}

#[cfg(test)]
mod cell_results_tests {
    use super::*;

    #[test]
    fn test_push_keeps_invocation_order() {
        let mut results = CellResults::new();
        assert!(results.push(RunResult::Succeeded {
            elapsed: Duration::from_secs(3)
        }));
        assert!(results.push(RunResult::Failed {
            exit_code: Some(1),
            output: String::new()
        }));
        assert!(results.push(RunResult::Succeeded {
            elapsed: Duration::from_secs(1)
        }));

        assert_eq!(results.len(), 3);
        assert_eq!(results.failures(), 1);
        assert_eq!(results.durations_secs(), vec![3.0, 1.0]);
        assert!(results.runs()[1].elapsed().is_none());
    }

    #[test]
    fn test_closed_results_reject_appends() {
        let mut results = CellResults::new();
        results.push(RunResult::Succeeded {
            elapsed: Duration::from_secs(1),
        });
        results.close();

        assert!(results.is_closed());
        assert!(!results.push(RunResult::Succeeded {
            elapsed: Duration::from_secs(2)
        }));
        assert_eq!(results.len(), 1);
    }
}

#[cfg(test)]
mod report_table_tests {
    use super::*;

    #[test]
    fn test_unrecorded_cells_are_not_completed() {
        let table = ReportTable::new(
            vec!["a".into(), "b".into()],
            vec!["x".into(), "y".into()],
        );
        assert_eq!(table.get(&cell("a", "x")), AggregateStat::NotCompleted);
        assert_eq!(table.completed_cells(), 0);
        assert_eq!(table.total_cells(), 4);
    }

    #[test]
    fn test_record_sets_each_cell_once() {
        let mut table = ReportTable::new(vec!["a".into()], vec!["x".into()]);
        assert!(table.record(&cell("a", "x"), AggregateStat::Value(1.5)));
        assert!(!table.record(&cell("a", "x"), AggregateStat::Value(9.0)));
        assert_eq!(table.get(&cell("a", "x")), AggregateStat::Value(1.5));
    }

    #[test]
    fn test_record_rejects_unknown_cells() {
        let mut table = ReportTable::new(vec!["a".into()], vec!["x".into()]);
        assert!(!table.record(&cell("zzz", "x"), AggregateStat::Value(1.0)));
        assert!(!table.record(&cell("a", "zzz"), AggregateStat::Value(1.0)));
    }

    #[test]
    fn test_rows_follow_supplied_order() {
        let mut table = ReportTable::new(
            vec!["zeta".into(), "alpha".into()],
            vec!["y".into(), "x".into()],
        );
        // Record out of order; layout must not change.
        table.record(&cell("alpha", "x"), AggregateStat::Value(4.0));
        table.record(&cell("zeta", "y"), AggregateStat::Value(1.0));

        let rows: Vec<(String, Vec<AggregateStat>)> = table
            .rows()
            .map(|(b, stats)| (b.to_string(), stats))
            .collect();

        assert_eq!(rows[0].0, "zeta");
        assert_eq!(
            rows[0].1,
            vec![AggregateStat::Value(1.0), AggregateStat::NotCompleted]
        );
        assert_eq!(rows[1].0, "alpha");
        assert_eq!(
            rows[1].1,
            vec![AggregateStat::NotCompleted, AggregateStat::Value(4.0)]
        );
    }

    #[test]
    fn test_stat_display() {
        assert_eq!(AggregateStat::Value(11.5).to_string(), "11.5");
        assert_eq!(AggregateStat::Value(7.0).to_string(), "7");
        assert_eq!(AggregateStat::NotCompleted.to_string(), NOT_COMPLETED);
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(cell("blackscholes", "pthread").to_string(), "blackscholes.pthread");
    }
}

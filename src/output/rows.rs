//! Result rows.

/// A row that can be written as one CSV line.
pub trait CsvRecord {
    /// Field values in column order.
    fn fields(&self) -> Vec<String>;
}

/// One abandoned algorithm attempt inside a fitness sweep.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AttemptRow {
    pub starting_fitness: f64,
    pub algorithm_index: usize,
    pub fitness: f64,
    pub iterations: usize,
}

impl AttemptRow {
    pub const HEADER: [&'static str; 4] = [
        "starting fitness",
        "algorithm number",
        "fitness",
        "number of iterations",
    ];
}

impl CsvRecord for AttemptRow {
    fn fields(&self) -> Vec<String> {
        vec![
            self.starting_fitness.to_string(),
            self.algorithm_index.to_string(),
            self.fitness.to_string(),
            self.iterations.to_string(),
        ]
    }
}

/// One completed hyper-heuristic run of an orchestrated batch.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RunRow {
    /// Repetition index within the instance.
    pub iteration: usize,
    pub problem_instance: usize,
    pub problem_seed: u64,
    pub algorithm_seed: u64,
    pub starting_fitness: f64,
    pub ensemble_number: usize,
    pub fitness: f64,
    /// Algorithm attempts completed during the run.
    pub runs: usize,
    pub label: String,
}

impl RunRow {
    /// Column names; the last column is named after what `label` holds.
    pub fn header(label_column: &str) -> Vec<String> {
        [
            "iteration",
            "problem instance",
            "problem seed",
            "algorithm seed",
            "starting fitness",
            "ensemble number",
            "fitness",
            "number of runs",
            label_column,
        ]
        .iter()
        .map(|column| column.to_string())
        .collect()
    }
}

impl CsvRecord for RunRow {
    fn fields(&self) -> Vec<String> {
        vec![
            self.iteration.to_string(),
            self.problem_instance.to_string(),
            self.problem_seed.to_string(),
            self.algorithm_seed.to_string(),
            self.starting_fitness.to_string(),
            self.ensemble_number.to_string(),
            self.fitness.to_string(),
            self.runs.to_string(),
            self.label.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_row_fields() {
        let row = AttemptRow {
            starting_fitness: 12.5,
            algorithm_index: 3,
            fitness: 10.0,
            iterations: 4,
        };
        assert_eq!(row.fields(), vec!["12.5", "3", "10", "4"]);
    }

    #[test]
    fn test_run_row_header_and_fields() {
        let header = RunRow::header("heuristics");
        assert_eq!(header.len(), 9);
        assert_eq!(header[0], "iteration");
        assert_eq!(header[8], "heuristics");

        let row = RunRow {
            iteration: 1,
            problem_instance: 2,
            problem_seed: 1001,
            algorithm_seed: 1001,
            starting_fitness: 0.25,
            ensemble_number: 7,
            fitness: 0.125,
            runs: 9,
            label: "0-1-2".into(),
        };
        assert_eq!(
            row.fields().join(","),
            "1,2,1001,1001,0.25,7,0.125,9,0-1-2"
        );
    }
}

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use ringroad::ProblemInstance;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// JSON instance file: `m` and `n` are inferred from the rows of `a`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceFile {
    pub d: Vec<f64>,
    pub a: Vec<Vec<f64>>,
    pub b: Vec<Vec<f64>>,
}

impl InstanceFile {
    pub fn into_instance(self) -> Result<ProblemInstance> {
        Ok(ProblemInstance::from_rows(&self.d, &self.a, &self.b)?)
    }
}

pub fn load_json(path: &Path) -> Result<ProblemInstance> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let file: InstanceFile = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing instance {}", path.display()))?;
    file.into_instance()
        .with_context(|| format!("validating instance {}", path.display()))
}

/// Headerless CSV matrices (one caller per row, one ring per column).
pub fn load_csv(a_path: &Path, b_path: &Path, d: &[f64]) -> Result<ProblemInstance> {
    let a = read_matrix_csv(a_path)?;
    let b = read_matrix_csv(b_path)?;
    tracing::info!(rows = a.len(), cols = d.len(), "csv_matrices");
    Ok(ProblemInstance::from_rows(d, &a, &b)?)
}

fn read_matrix_csv(path: &Path) -> Result<Vec<Vec<f64>>> {
    let df = LazyCsvReader::new(path)
        .with_has_header(false)
        .finish()
        .and_then(|lf| lf.collect())
        .with_context(|| format!("reading csv {}", path.display()))?;
    let mut columns = Vec::with_capacity(df.width());
    for series in df.get_columns() {
        let cast = series.cast(&DataType::Float64)?;
        let values = cast
            .f64()?
            .into_iter()
            .enumerate()
            .map(|(row, v)| {
                v.with_context(|| format!("{}: empty cell in row {row}", path.display()))
            })
            .collect::<Result<Vec<f64>>>()?;
        columns.push(values);
    }
    if columns.is_empty() {
        bail!("{}: no columns", path.display());
    }
    Ok((0..df.height())
        .map(|i| columns.iter().map(|col| col[i]).collect())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn json_instance_round_trip_to_problem() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("inst.json");
        let file = InstanceFile {
            d: vec![22.0, 16.0],
            a: vec![vec![3.0, 3.0], vec![4.0, 5.0]],
            b: vec![vec![3.0, 5.0], vec![6.0, 6.0]],
        };
        fs::write(&path, serde_json::to_vec(&file).unwrap()).unwrap();
        let inst = load_json(&path).unwrap();
        assert_eq!((inst.m(), inst.n()), (2, 2));
        assert_eq!(inst.minimum_threshold(), 4.0);
    }

    #[test]
    fn json_shape_error_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"d":[1.0],"a":[[1.0,2.0]],"b":[[1.0,2.0]]}"#).unwrap();
        let err = load_json(&path).unwrap_err();
        let chain = format!("{err:#}");
        assert!(chain.contains("circumference list has length 1, expected 2"), "{chain}");
    }

    #[test]
    fn csv_matrices_load() {
        let dir = tempdir().unwrap();
        let a_path = dir.path().join("a.csv");
        let b_path = dir.path().join("b.csv");
        fs::write(&a_path, "3,9\n4,8\n6,6\n").unwrap();
        fs::write(&b_path, "3,10\n6,9\n7,7\n").unwrap();
        let inst = load_csv(&a_path, &b_path, &[22.0, 22.0]).unwrap();
        assert_eq!((inst.m(), inst.n()), (3, 2));
        assert_eq!(inst.b()[(1, 1)], 9.0);
        assert_eq!(inst.minimum_threshold(), 6.0);
    }
}

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by a model while validating its parameters or running inference.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("expected {expected} feature(s) per sample, got {actual}")]
    FeatureMismatch { expected: usize, actual: usize },

    #[error("no samples to predict")]
    EmptyInput,

    #[error("invalid model parameters: {0}")]
    Invalid(String),

    #[error("model produced a non-finite prediction")]
    NonFinite,
}

/// Capability interface of a pre-fitted regression model.
///
/// Inputs are a 2D matrix (one row per sample, one column per feature); the
/// output has one value per row. Implementations must be deterministic.
pub trait StockingModel {
    /// Number of features each sample row must carry.
    fn n_features(&self) -> usize;

    fn predict(&self, samples: &[Vec<f64>]) -> Result<Vec<f64>, ModelError>;

    /// Predict for a single scalar feature (the item quantity).
    fn infer(&self, quantity: f64) -> Result<f64, ModelError> {
        let out = self.predict(&[vec![quantity]])?;
        out.first().copied().ok_or(ModelError::EmptyInput)
    }
}

/// Leaf marker in [`RegressionModel::DecisionTree`] child arrays.
pub const TREE_LEAF: i64 = -1;

/// Concrete model kinds understood by the artifact format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegressionModel {
    /// `intercept + Σ coef[i] * x[i]`
    Linear { coef: Vec<f64>, intercept: f64 },

    /// Single-feature polynomial; `coefficients[k]` multiplies `x^k`.
    Polynomial { coefficients: Vec<f64> },

    /// Binary regression tree in flat array layout.
    ///
    /// Node `i` is a leaf when `children_left[i] == -1`. Otherwise samples go
    /// left when `x[feature[i]] <= threshold[i]`.
    DecisionTree {
        n_features: usize,
        children_left: Vec<i64>,
        children_right: Vec<i64>,
        feature: Vec<usize>,
        threshold: Vec<f64>,
        value: Vec<f64>,
    },
}

impl RegressionModel {
    /// Structural checks run once when an artifact is loaded.
    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            RegressionModel::Linear { coef, intercept } => {
                if coef.is_empty() {
                    return Err(ModelError::Invalid("linear model has no coefficients".into()));
                }
                if !intercept.is_finite() || coef.iter().any(|c| !c.is_finite()) {
                    return Err(ModelError::Invalid(
                        "linear model has non-finite parameters".into(),
                    ));
                }
                Ok(())
            }
            RegressionModel::Polynomial { coefficients } => {
                if coefficients.is_empty() {
                    return Err(ModelError::Invalid("polynomial model has no coefficients".into()));
                }
                if coefficients.iter().any(|c| !c.is_finite()) {
                    return Err(ModelError::Invalid(
                        "polynomial model has non-finite coefficients".into(),
                    ));
                }
                Ok(())
            }
            RegressionModel::DecisionTree {
                n_features,
                children_left,
                children_right,
                feature,
                threshold,
                value,
            } => {
                let n = children_left.len();
                if n == 0 {
                    return Err(ModelError::Invalid("decision tree has no nodes".into()));
                }
                if *n_features == 0 {
                    return Err(ModelError::Invalid("decision tree has zero features".into()));
                }
                if [children_right.len(), feature.len(), threshold.len(), value.len()]
                    .iter()
                    .any(|len| *len != n)
                {
                    return Err(ModelError::Invalid(
                        "decision tree node arrays differ in length".into(),
                    ));
                }

                for i in 0..n {
                    let (left, right) = (children_left[i], children_right[i]);
                    if !value[i].is_finite() {
                        return Err(ModelError::Invalid(format!("node {i} has a non-finite value")));
                    }
                    if left == TREE_LEAF && right == TREE_LEAF {
                        continue;
                    }
                    // Children must point strictly forward; this also rules out cycles.
                    let in_range = |c: i64| c > i as i64 && (c as usize) < n;
                    if !in_range(left) || !in_range(right) {
                        return Err(ModelError::Invalid(format!(
                            "node {i} has out-of-range children"
                        )));
                    }
                    if feature[i] >= *n_features {
                        return Err(ModelError::Invalid(format!(
                            "node {i} splits on feature {} of {n_features}",
                            feature[i]
                        )));
                    }
                    if !threshold[i].is_finite() {
                        return Err(ModelError::Invalid(format!(
                            "node {i} has a non-finite threshold"
                        )));
                    }
                }
                Ok(())
            }
        }
    }

    /// Evaluate one sample row.
    ///
    /// All indexing is checked: registries built in memory skip `validate()`,
    /// so a malformed model must surface as `ModelError::Invalid`.
    fn predict_row(&self, x: &[f64]) -> Result<f64, ModelError> {
        match self {
            RegressionModel::Linear { coef, intercept } => {
                Ok(intercept + coef.iter().zip(x).map(|(c, v)| c * v).sum::<f64>())
            }
            RegressionModel::Polynomial { coefficients } => {
                let x = *x.first().ok_or(ModelError::EmptyInput)?;
                Ok(coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c))
            }
            RegressionModel::DecisionTree {
                children_left,
                children_right,
                feature,
                threshold,
                value,
                ..
            } => {
                let broken =
                    |node: usize| ModelError::Invalid(format!("tree node {node} is malformed"));
                let mut node = 0usize;
                // A well-formed tree reaches a leaf in fewer steps than it has nodes.
                for _ in 0..=children_left.len() {
                    let left = *children_left.get(node).ok_or_else(|| broken(node))?;
                    if left == TREE_LEAF {
                        return value.get(node).copied().ok_or_else(|| broken(node));
                    }
                    let split = feature
                        .get(node)
                        .and_then(|f| x.get(*f))
                        .zip(threshold.get(node))
                        .ok_or_else(|| broken(node))?;
                    let next = if split.0 <= split.1 {
                        left
                    } else {
                        *children_right.get(node).ok_or_else(|| broken(node))?
                    };
                    node = usize::try_from(next).map_err(|_| broken(node))?;
                }
                Err(ModelError::Invalid("tree traversal does not terminate".into()))
            }
        }
    }
}

impl StockingModel for RegressionModel {
    fn n_features(&self) -> usize {
        match self {
            RegressionModel::Linear { coef, .. } => coef.len(),
            RegressionModel::Polynomial { .. } => 1,
            RegressionModel::DecisionTree { n_features, .. } => *n_features,
        }
    }

    fn predict(&self, samples: &[Vec<f64>]) -> Result<Vec<f64>, ModelError> {
        if samples.is_empty() {
            return Err(ModelError::EmptyInput);
        }
        let expected = self.n_features();
        samples
            .iter()
            .map(|row| {
                if row.len() != expected {
                    return Err(ModelError::FeatureMismatch {
                        expected,
                        actual: row.len(),
                    });
                }
                self.predict_row(row)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump() -> RegressionModel {
        // quantity <= 10 -> 4 days, else 9 days
        RegressionModel::DecisionTree {
            n_features: 1,
            children_left: vec![1, TREE_LEAF, TREE_LEAF],
            children_right: vec![2, TREE_LEAF, TREE_LEAF],
            feature: vec![0, 0, 0],
            threshold: vec![10.0, 0.0, 0.0],
            value: vec![6.5, 4.0, 9.0],
        }
    }

    #[test]
    fn linear_model_applies_coefficients_and_intercept() {
        let m = RegressionModel::Linear {
            coef: vec![0.5],
            intercept: 1.0,
        };
        assert_eq!(m.infer(10.0).unwrap(), 6.0);
        assert_eq!(m.predict(&[vec![0.0], vec![4.0]]).unwrap(), vec![1.0, 3.0]);
    }

    #[test]
    fn polynomial_model_uses_ascending_powers() {
        // 1 + 2x + 3x^2
        let m = RegressionModel::Polynomial {
            coefficients: vec![1.0, 2.0, 3.0],
        };
        assert_eq!(m.infer(2.0).unwrap(), 17.0);
        assert_eq!(m.infer(0.0).unwrap(), 1.0);
    }

    #[test]
    fn decision_tree_routes_on_threshold() {
        let m = stump();
        m.validate().unwrap();
        assert_eq!(m.infer(10.0).unwrap(), 4.0);
        assert_eq!(m.infer(10.5).unwrap(), 9.0);
        assert_eq!(m.infer(-3.0).unwrap(), 4.0);
    }

    #[test]
    fn predict_rejects_wrong_feature_count_and_empty_input() {
        let m = RegressionModel::Linear {
            coef: vec![1.0, 1.0],
            intercept: 0.0,
        };
        assert_eq!(
            m.infer(1.0).unwrap_err(),
            ModelError::FeatureMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(m.predict(&[]).unwrap_err(), ModelError::EmptyInput);
    }

    #[test]
    fn validate_rejects_malformed_models() {
        let cases = vec![
            RegressionModel::Linear {
                coef: vec![],
                intercept: 0.0,
            },
            RegressionModel::Linear {
                coef: vec![f64::NAN],
                intercept: 0.0,
            },
            RegressionModel::Polynomial {
                coefficients: vec![],
            },
            RegressionModel::DecisionTree {
                n_features: 1,
                children_left: vec![0],
                children_right: vec![0],
                feature: vec![0],
                threshold: vec![1.0],
                value: vec![1.0],
            },
            RegressionModel::DecisionTree {
                n_features: 1,
                children_left: vec![1, TREE_LEAF],
                children_right: vec![5, TREE_LEAF],
                feature: vec![0, 0],
                threshold: vec![1.0, 0.0],
                value: vec![1.0, 2.0],
            },
            RegressionModel::DecisionTree {
                n_features: 1,
                children_left: vec![1, TREE_LEAF, TREE_LEAF],
                children_right: vec![2, TREE_LEAF, TREE_LEAF],
                feature: vec![3, 0, 0],
                threshold: vec![1.0, 0.0, 0.0],
                value: vec![1.0, 2.0, 3.0],
            },
            RegressionModel::DecisionTree {
                n_features: 1,
                children_left: vec![TREE_LEAF],
                children_right: vec![TREE_LEAF, TREE_LEAF],
                feature: vec![0],
                threshold: vec![0.0],
                value: vec![1.0],
            },
        ];

        for m in cases {
            match m.validate() {
                Err(ModelError::Invalid(_)) => {}
                other => panic!("expected Invalid for {m:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn deserialises_tagged_artifact_entries() {
        let m: RegressionModel =
            serde_json::from_str(r#"{"kind":"linear","coef":[-0.5],"intercept":2.7}"#).unwrap();
        assert_eq!(
            m,
            RegressionModel::Linear {
                coef: vec![-0.5],
                intercept: 2.7
            }
        );

        let err = serde_json::from_str::<RegressionModel>(r#"{"kind":"svm","c":1.0}"#);
        assert!(err.is_err());
    }
}

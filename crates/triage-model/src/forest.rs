//! Decision-forest classifier loaded from a serialized JSON model.
//!
//! The model file is produced by the offline training pipeline. Each tree is
//! a flat node array: internal nodes branch on one boolean feature (left on
//! 0, right on 1), leaves carry a disease label. The forest's prediction is
//! the majority label across trees, ties broken by first-seen order.

use std::io;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::backend::Classifier;
use crate::error::ModelError;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Node {
    Branch {
        feature: usize,
        left: usize,
        right: usize,
    },
    Leaf {
        label: String,
    },
}

#[derive(Debug, Deserialize)]
struct Tree {
    nodes: Vec<Node>,
}

#[derive(Debug, Deserialize)]
struct ForestModel {
    n_features: usize,
    trees: Vec<Tree>,
}

/// A pretrained decision forest over boolean symptom features.
#[derive(Debug)]
pub struct ForestClassifier {
    model: ForestModel,
}

impl ForestClassifier {
    /// Deserialize and validate a model.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, ModelError> {
        let model: ForestModel =
            serde_json::from_reader(reader).map_err(|e| ModelError::Load(e.to_string()))?;
        validate(&model)?;
        Ok(Self { model })
    }

    /// Load a model file from disk.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let file = std::fs::File::open(path)
            .map_err(|e| ModelError::Load(format!("{}: {e}", path.display())))?;
        let classifier = Self::from_reader(io::BufReader::new(file))?;
        info!(
            trees = classifier.model.trees.len(),
            n_features = classifier.model.n_features,
            "decision-forest model loaded"
        );
        Ok(classifier)
    }
}

impl Classifier for ForestClassifier {
    fn n_features(&self) -> usize {
        self.model.n_features
    }

    fn predict(&self, features: &[u8]) -> Result<String, ModelError> {
        if features.len() != self.model.n_features {
            return Err(ModelError::FeatureLength {
                expected: self.model.n_features,
                got: features.len(),
            });
        }

        // Tally votes in first-seen order so ties resolve deterministically.
        let mut votes: Vec<(&str, usize)> = Vec::new();
        for tree in &self.model.trees {
            let label = eval_tree(tree, features);
            match votes.iter_mut().find(|(l, _)| *l == label) {
                Some((_, count)) => *count += 1,
                None => votes.push((label, 1)),
            }
        }

        // Strictly-greater keeps the earliest label on a tie.
        let mut winner: Option<(&str, usize)> = None;
        for &(label, count) in &votes {
            if winner.map_or(true, |(_, best)| count > best) {
                winner = Some((label, count));
            }
        }

        let (label, _) =
            winner.ok_or_else(|| ModelError::Malformed("forest has no trees".to_string()))?;
        Ok(label.to_string())
    }
}

/// Walk one tree to its leaf. Validation guarantees child indices point
/// forward, so this terminates.
fn eval_tree<'a>(tree: &'a Tree, features: &[u8]) -> &'a str {
    let mut index = 0;
    loop {
        match &tree.nodes[index] {
            Node::Leaf { label } => return label,
            Node::Branch {
                feature,
                left,
                right,
            } => {
                index = if features[*feature] == 0 { *left } else { *right };
            }
        }
    }
}

fn validate(model: &ForestModel) -> Result<(), ModelError> {
    if model.trees.is_empty() {
        return Err(ModelError::Malformed("forest has no trees".to_string()));
    }

    for (t, tree) in model.trees.iter().enumerate() {
        if tree.nodes.is_empty() {
            return Err(ModelError::Malformed(format!("tree {t} has no nodes")));
        }
        for (n, node) in tree.nodes.iter().enumerate() {
            if let Node::Branch {
                feature,
                left,
                right,
            } = node
            {
                if *feature >= model.n_features {
                    return Err(ModelError::Malformed(format!(
                        "tree {t} node {n}: feature {feature} out of range"
                    )));
                }
                // Children must point forward past the current node.
                for child in [*left, *right] {
                    if child <= n || child >= tree.nodes.len() {
                        return Err(ModelError::Malformed(format!(
                            "tree {t} node {n}: invalid child index {child}"
                        )));
                    }
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier(json: &str) -> Result<ForestClassifier, ModelError> {
        ForestClassifier::from_reader(json.as_bytes())
    }

    #[test]
    fn test_single_leaf_tree() {
        let model = r#"{
            "n_features": 2,
            "trees": [{"nodes": [{"label": "Migraine"}]}]
        }"#;
        let c = classifier(model).unwrap();
        assert_eq!(c.predict(&[0, 0]).unwrap(), "Migraine");
        assert_eq!(c.n_features(), 2);
    }

    #[test]
    fn test_branch_routes_on_feature() {
        let model = r#"{
            "n_features": 2,
            "trees": [{"nodes": [
                {"feature": 0, "left": 1, "right": 2},
                {"label": "Common Cold"},
                {"label": "Fungal infection"}
            ]}]
        }"#;
        let c = classifier(model).unwrap();
        assert_eq!(c.predict(&[0, 0]).unwrap(), "Common Cold");
        assert_eq!(c.predict(&[1, 0]).unwrap(), "Fungal infection");
    }

    #[test]
    fn test_majority_vote_across_trees() {
        let model = r#"{
            "n_features": 1,
            "trees": [
                {"nodes": [{"label": "A"}]},
                {"nodes": [{"label": "B"}]},
                {"nodes": [{"label": "B"}]}
            ]
        }"#;
        let c = classifier(model).unwrap();
        assert_eq!(c.predict(&[0]).unwrap(), "B");
    }

    #[test]
    fn test_tie_breaks_to_first_seen_label() {
        let model = r#"{
            "n_features": 1,
            "trees": [
                {"nodes": [{"label": "A"}]},
                {"nodes": [{"label": "B"}]}
            ]
        }"#;
        let c = classifier(model).unwrap();
        assert_eq!(c.predict(&[0]).unwrap(), "A");
    }

    #[test]
    fn test_wrong_feature_length_errors() {
        let model = r#"{
            "n_features": 3,
            "trees": [{"nodes": [{"label": "A"}]}]
        }"#;
        let c = classifier(model).unwrap();
        let err = c.predict(&[0, 1]).unwrap_err();
        assert!(matches!(
            err,
            ModelError::FeatureLength {
                expected: 3,
                got: 2
            }
        ));
    }

    #[test]
    fn test_empty_forest_rejected() {
        let model = r#"{"n_features": 1, "trees": []}"#;
        assert!(matches!(
            classifier(model).unwrap_err(),
            ModelError::Malformed(_)
        ));
    }

    #[test]
    fn test_feature_out_of_range_rejected() {
        let model = r#"{
            "n_features": 1,
            "trees": [{"nodes": [
                {"feature": 5, "left": 1, "right": 2},
                {"label": "A"},
                {"label": "B"}
            ]}]
        }"#;
        assert!(matches!(
            classifier(model).unwrap_err(),
            ModelError::Malformed(_)
        ));
    }

    #[test]
    fn test_backward_child_index_rejected() {
        // A child pointing at itself or backwards would loop forever.
        let model = r#"{
            "n_features": 1,
            "trees": [{"nodes": [
                {"feature": 0, "left": 0, "right": 1},
                {"label": "A"}
            ]}]
        }"#;
        assert!(matches!(
            classifier(model).unwrap_err(),
            ModelError::Malformed(_)
        ));
    }

    #[test]
    fn test_invalid_json_is_load_error() {
        assert!(matches!(
            classifier("not json").unwrap_err(),
            ModelError::Load(_)
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(
            &path,
            r#"{"n_features": 1, "trees": [{"nodes": [{"label": "A"}]}]}"#,
        )
        .unwrap();

        let c = ForestClassifier::load(&path).unwrap();
        assert_eq!(c.predict(&[1]).unwrap(), "A");
    }

    #[test]
    fn test_load_missing_file_is_load_error() {
        let err = ForestClassifier::load(Path::new("/nonexistent/model.json")).unwrap_err();
        assert!(matches!(err, ModelError::Load(_)));
    }
}

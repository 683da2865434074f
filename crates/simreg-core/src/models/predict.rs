//! Prediction function for fitted models
//!
//! Computes predictions using the fitted slope and intercept.

use crate::types::{Dataset, Model, Prediction};

/// Predict every observation in `dataset`
///
/// Returns one `Prediction` per observation, in dataset order, with
/// `predicted = slope * x + intercept`.
pub fn predict(model: &Model, dataset: &Dataset) -> Vec<Prediction> {
    dataset
        .iter()
        .map(|o| Prediction {
            x: o.x,
            y: o.y,
            id: o.id,
            predicted: model.predict_one(o.x),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(slope: f64, intercept: f64) -> Model {
        Model {
            slope,
            intercept,
            mean_x: 0.0,
            mean_y: 0.0,
        }
    }

    #[test]
    fn test_predict_basic() {
        // y = 2*x + 1
        let dataset = Dataset::from_points(&[
            (1.0, 3.0),
            (2.0, 5.0),
            (3.0, 7.0),
            (4.0, 9.0),
            (5.0, 11.0),
        ]);

        let predictions = predict(&model(2.0, 1.0), &dataset);

        assert_eq!(predictions.len(), 5);
        assert!((predictions[0].predicted - 3.0).abs() < 1e-10); // 2*1 + 1 = 3
        assert!((predictions[1].predicted - 5.0).abs() < 1e-10); // 2*2 + 1 = 5
        assert!((predictions[2].predicted - 7.0).abs() < 1e-10); // 2*3 + 1 = 7
        assert!((predictions[3].predicted - 9.0).abs() < 1e-10); // 2*4 + 1 = 9
        assert!((predictions[4].predicted - 11.0).abs() < 1e-10); // 2*5 + 1 = 11
    }

    #[test]
    fn test_predict_preserves_order_and_ids() {
        let dataset = Dataset::from_points(&[(4.0, 1.0), (0.5, 2.0), (2.0, 0.0)]);

        let predictions = predict(&model(-1.0, 0.5), &dataset);

        assert_eq!(predictions.len(), dataset.len());
        for (p, o) in predictions.iter().zip(dataset.iter()) {
            assert_eq!((p.x, p.y, p.id), (o.x, o.y, o.id));
        }
        assert!((predictions[0].residual() - (2.0 - 0.0)).abs() < 1e-12);
    }

    #[test]
    fn test_predict_empty_dataset() {
        let predictions = predict(&model(1.0, 1.0), &Dataset::from_points(&[]));
        assert!(predictions.is_empty());
    }
}

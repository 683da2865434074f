//! C FFI boundary for simreg
//!
//! This crate exposes the training pipeline to a presentation layer written in
//! another language. Values cross the boundary at full precision; rounding for
//! display is left to the caller.

mod types;

pub use types::*;

use log::{debug, warn};
use simreg_core::{
    train_from_entropy, train_seeded, GeneratorOptions, StatsError, TrainOptions, TrainResult,
};

/// Convert StatsError to ErrorCode
fn error_to_code(err: &StatsError) -> ErrorCode {
    match err {
        StatsError::InvalidParameter { .. } => ErrorCode::InvalidParameter,
        StatsError::InsufficientData { .. } => ErrorCode::InsufficientData,
        StatsError::DegenerateInput { .. } => ErrorCode::DegenerateInput,
        StatsError::DimensionMismatch { .. } => ErrorCode::DimensionMismatch,
    }
}

fn to_train_options(options: &TrainOptionsFFI) -> TrainOptions {
    TrainOptions {
        generator: GeneratorOptions {
            true_slope: options.true_slope,
            true_intercept: options.true_intercept,
            ..Default::default()
        },
        compute_inference: options.compute_inference,
        confidence_level: options.confidence_level,
        ..Default::default()
    }
}

/// Copy a slice into a `malloc`ed buffer; null on allocation failure
unsafe fn malloc_copy<T: Copy>(src: &[T]) -> *mut T {
    let ptr = libc::malloc(src.len().max(1) * std::mem::size_of::<T>()) as *mut T;
    if !ptr.is_null() {
        std::ptr::copy_nonoverlapping(src.as_ptr(), ptr, src.len());
    }
    ptr
}

unsafe fn free_ptr<T>(ptr: *mut T) {
    if !ptr.is_null() {
        libc::free(ptr as *mut libc::c_void);
    }
}

unsafe fn fill_points(result: &TrainResult, out_points: *mut PointsFFI) -> bool {
    let x: Vec<f64> = result.predictions.iter().map(|p| p.x).collect();
    let y: Vec<f64> = result.predictions.iter().map(|p| p.y).collect();
    let predicted: Vec<f64> = result.predictions.iter().map(|p| p.predicted).collect();
    let id: Vec<usize> = result.predictions.iter().map(|p| p.id).collect();

    let x_ptr = malloc_copy(&x);
    let y_ptr = malloc_copy(&y);
    let predicted_ptr = malloc_copy(&predicted);
    let id_ptr = malloc_copy(&id);

    if x_ptr.is_null() || y_ptr.is_null() || predicted_ptr.is_null() || id_ptr.is_null() {
        free_ptr(x_ptr);
        free_ptr(y_ptr);
        free_ptr(predicted_ptr);
        free_ptr(id_ptr);
        return false;
    }

    (*out_points) = PointsFFI {
        x: x_ptr,
        y: y_ptr,
        predicted: predicted_ptr,
        id: id_ptr,
        len: result.predictions.len(),
    };
    true
}

/// Generate a dataset, fit it and score the fit
///
/// # Safety
/// - `out_model`, `out_metrics` and `out_points` must be valid pointers
/// - `out_inference` can be NULL if not needed
/// - `out_error` can be NULL, in which case error details are discarded
///
/// # Returns
/// `true` on success, `false` on error (check `out_error` for details).
/// On success the arrays in `out_points` must be released with
/// `simreg_free_points`.
#[no_mangle]
pub unsafe extern "C" fn simreg_train(
    options: TrainOptionsFFI,
    out_model: *mut ModelFFI,
    out_metrics: *mut MetricsFFI,
    out_points: *mut PointsFFI,
    out_inference: *mut InferenceFFI,
    out_error: *mut SimregError,
) -> bool {
    // Initialize error
    if !out_error.is_null() {
        *out_error = SimregError::success();
    }

    if out_model.is_null() || out_metrics.is_null() || out_points.is_null() {
        if !out_error.is_null() {
            (*out_error).set(
                ErrorCode::InvalidParameter,
                "out_model, out_metrics and out_points must not be NULL",
            );
        }
        return false;
    }

    let train_options = to_train_options(&options);

    // Call the core function with panic catching
    let train_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        if options.seed == 0 {
            train_from_entropy(options.sample_size, options.noise_level, &train_options)
        } else {
            train_seeded(
                options.sample_size,
                options.noise_level,
                &train_options,
                options.seed,
            )
        }
    }));

    let train_result = match train_result {
        Ok(r) => r,
        Err(_) => {
            warn!("panic while training on {} samples", options.sample_size);
            if !out_error.is_null() {
                (*out_error).set(ErrorCode::InternalError, "Internal panic in train");
            }
            return false;
        }
    };

    let result = match train_result {
        Ok(result) => result,
        Err(e) => {
            debug!("train failed: {}", e);
            if !out_error.is_null() {
                (*out_error).set(error_to_code(&e), &e.to_string());
            }
            return false;
        }
    };

    if !fill_points(&result, out_points) {
        if !out_error.is_null() {
            (*out_error).set(
                ErrorCode::AllocationFailure,
                "Failed to allocate point arrays",
            );
        }
        return false;
    }

    (*out_model) = ModelFFI {
        slope: result.model.slope,
        intercept: result.model.intercept,
        mean_x: result.model.mean_x,
        mean_y: result.model.mean_y,
    };

    (*out_metrics) = MetricsFFI {
        mse: result.metrics.mse,
        rmse: result.metrics.rmse,
        mae: result.metrics.mae,
        r2: result.metrics.r2,
        adjusted_r2: result.metrics.adjusted_r2,
        n: result.metrics.n,
    };

    if !out_inference.is_null() {
        (*out_inference) = match result.inference {
            Some(inf) => InferenceFFI {
                slope_std_error: inf.slope.std_error,
                slope_t_value: inf.slope.t_value,
                slope_p_value: inf.slope.p_value,
                slope_ci_lower: inf.slope.ci_lower,
                slope_ci_upper: inf.slope.ci_upper,
                intercept_std_error: inf.intercept.std_error,
                intercept_t_value: inf.intercept.t_value,
                intercept_p_value: inf.intercept.p_value,
                intercept_ci_lower: inf.intercept.ci_lower,
                intercept_ci_upper: inf.intercept.ci_upper,
                residual_std_error: inf.residual_std_error,
                f_statistic: inf.f_statistic,
                f_pvalue: inf.f_pvalue,
                confidence_level: inf.confidence_level,
            },
            None => InferenceFFI::default(),
        };
    }

    true
}

/// Free memory allocated by simreg_train for point arrays
///
/// # Safety
/// `points` must be NULL or a pointer to a PointsFFI previously filled by
/// simreg_train
#[no_mangle]
pub unsafe extern "C" fn simreg_free_points(points: *mut PointsFFI) {
    if points.is_null() {
        return;
    }
    free_ptr((*points).x);
    free_ptr((*points).y);
    free_ptr((*points).predicted);
    free_ptr((*points).id);
    (*points) = PointsFFI::default();
}

/// Install an `env_logger` logger configured from `RUST_LOG`
///
/// Safe to call more than once; later calls are no-ops.
#[no_mangle]
pub extern "C" fn simreg_init_logging() {
    let _ = env_logger::try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    unsafe fn run(
        options: TrainOptionsFFI,
    ) -> (bool, ModelFFI, MetricsFFI, PointsFFI, InferenceFFI, SimregError) {
        let mut model = ModelFFI::default();
        let mut metrics = MetricsFFI::default();
        let mut points = PointsFFI::default();
        let mut inference = InferenceFFI::default();
        let mut error = SimregError::success();
        let ok = simreg_train(
            options,
            &mut model,
            &mut metrics,
            &mut points,
            &mut inference,
            &mut error,
        );
        (ok, model, metrics, points, inference, error)
    }

    #[test]
    fn test_train_success() {
        unsafe {
            let options = TrainOptionsFFI {
                seed: 42,
                compute_inference: true,
                ..Default::default()
            };
            let (ok, model, metrics, mut points, inference, error) = run(options);

            assert!(ok);
            assert_eq!(error.code, ErrorCode::Success);
            assert_eq!(points.len, 100);
            assert_eq!(metrics.n, 100);
            assert!((model.slope - 2.5).abs() < 0.5);
            assert!(inference.slope_p_value < 0.05);

            let x = std::slice::from_raw_parts(points.x, points.len);
            let predicted = std::slice::from_raw_parts(points.predicted, points.len);
            assert!(x.windows(2).all(|w| w[0] <= w[1]));
            for (xi, pi) in x.iter().zip(predicted) {
                assert!((pi - (model.slope * xi + model.intercept)).abs() < 1e-9);
            }

            simreg_free_points(&mut points);
            assert!(points.x.is_null());
            assert_eq!(points.len, 0);
        }
    }

    #[test]
    fn test_train_seeded_matches_core() {
        unsafe {
            let options = TrainOptionsFFI {
                seed: 7,
                ..Default::default()
            };
            let (ok, model, metrics, mut points, _, _) = run(options);
            assert!(ok);

            let core = train_seeded(100, 0.1, &to_train_options(&options), 7).unwrap();
            assert_eq!(model.slope, core.model.slope);
            assert_eq!(metrics.r2, core.metrics.r2);

            simreg_free_points(&mut points);
        }
    }

    #[test]
    fn test_train_error_codes() {
        unsafe {
            let cases = [
                (
                    TrainOptionsFFI {
                        sample_size: 0,
                        ..Default::default()
                    },
                    ErrorCode::InvalidParameter,
                ),
                (
                    TrainOptionsFFI {
                        noise_level: -1.0,
                        ..Default::default()
                    },
                    ErrorCode::InvalidParameter,
                ),
                (
                    TrainOptionsFFI {
                        sample_size: 1,
                        ..Default::default()
                    },
                    ErrorCode::InsufficientData,
                ),
            ];

            for (options, expected) in cases {
                let (ok, _, _, points, _, error) = run(options);
                assert!(!ok);
                assert_eq!(error.code, expected);
                assert_ne!(error.message[0], 0);
                assert!(points.x.is_null());
            }
        }
    }

    #[test]
    fn test_train_null_outputs() {
        unsafe {
            let mut error = SimregError::success();
            let ok = simreg_train(
                TrainOptionsFFI::default(),
                std::ptr::null_mut(),
                std::ptr::null_mut(),
                std::ptr::null_mut(),
                std::ptr::null_mut(),
                &mut error,
            );
            assert!(!ok);
            assert_eq!(error.code, ErrorCode::InvalidParameter);
        }
    }

    #[test]
    fn test_error_message_truncated() {
        let mut error = SimregError::success();
        error.set(ErrorCode::InternalError, &"x".repeat(400));
        assert_eq!(error.message[254], b'x' as libc::c_char);
        assert_eq!(error.message[255], 0);
    }

    #[test]
    fn test_error_message_truncated_on_char_boundary() {
        let mut error = SimregError::success();
        // 254 ASCII bytes followed by a two-byte character straddling the limit
        let msg = format!("{}²", "x".repeat(254));
        error.set(ErrorCode::InternalError, &msg);
        assert_eq!(error.message[253], b'x' as libc::c_char);
        assert_eq!(error.message[254], 0);

        let text = unsafe { std::ffi::CStr::from_ptr(error.message.as_ptr()) };
        assert!(text.to_str().is_ok());

        error.set(ErrorCode::InternalError, "R² undefined");
        let text = unsafe { std::ffi::CStr::from_ptr(error.message.as_ptr()) };
        assert_eq!(text.to_str(), Ok("R² undefined"));
    }

    #[test]
    fn test_free_points_null() {
        unsafe {
            simreg_free_points(std::ptr::null_mut());
        }
        simreg_init_logging();
        simreg_init_logging();
    }
}

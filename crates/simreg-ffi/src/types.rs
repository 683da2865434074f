//! C-compatible types for FFI boundary

use libc::c_char;

/// Error codes for FFI boundary
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,
    InvalidParameter = 1,
    InsufficientData = 2,
    DegenerateInput = 3,
    DimensionMismatch = 4,
    AllocationFailure = 5,
    InternalError = 99,
}

/// Error information for FFI
#[repr(C)]
pub struct SimregError {
    pub code: ErrorCode,
    pub message: [c_char; 256],
}

impl SimregError {
    pub fn success() -> Self {
        Self {
            code: ErrorCode::Success,
            message: [0; 256],
        }
    }

    pub fn set(&mut self, code: ErrorCode, msg: &str) {
        self.code = code;
        let bytes = msg.as_bytes();
        let mut len = bytes.len().min(255);
        // Never split a multi-byte character
        while !msg.is_char_boundary(len) {
            len -= 1;
        }
        for (i, &b) in bytes[..len].iter().enumerate() {
            self.message[i] = b as c_char;
        }
        self.message[len] = 0;
    }
}

/// Training options for FFI
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct TrainOptionsFFI {
    /// Number of observations to generate
    pub sample_size: usize,
    /// Noise factor (>= 0)
    pub noise_level: f64,
    /// Seed for reproducibility (0 = random)
    pub seed: u64,
    /// Slope of the latent line
    pub true_slope: f64,
    /// Intercept of the latent line
    pub true_intercept: f64,
    /// Whether to compute inference statistics
    pub compute_inference: bool,
    /// Confidence level for CIs
    pub confidence_level: f64,
}

impl Default for TrainOptionsFFI {
    fn default() -> Self {
        Self {
            sample_size: 100,
            noise_level: 0.1,
            seed: 0,
            true_slope: 2.5,
            true_intercept: 10.0,
            compute_inference: false,
            confidence_level: 0.95,
        }
    }
}

/// Fitted model
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ModelFFI {
    pub slope: f64,
    pub intercept: f64,
    pub mean_x: f64,
    pub mean_y: f64,
}

impl Default for ModelFFI {
    fn default() -> Self {
        Self {
            slope: f64::NAN,
            intercept: f64::NAN,
            mean_x: f64::NAN,
            mean_y: f64::NAN,
        }
    }
}

/// Fit metrics at full precision
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct MetricsFFI {
    pub mse: f64,
    pub rmse: f64,
    pub mae: f64,
    pub r2: f64,
    pub adjusted_r2: f64,
    pub n: usize,
}

impl Default for MetricsFFI {
    fn default() -> Self {
        Self {
            mse: f64::NAN,
            rmse: f64::NAN,
            mae: f64::NAN,
            r2: f64::NAN,
            adjusted_r2: f64::NAN,
            n: 0,
        }
    }
}

/// Per-point data as parallel arrays, sorted ascending by `x`
///
/// Arrays are allocated with `malloc` and must be released with
/// `simreg_free_points`.
#[repr(C)]
pub struct PointsFFI {
    pub x: *mut f64,
    pub y: *mut f64,
    pub predicted: *mut f64,
    /// Generation order of each point
    pub id: *mut usize,
    pub len: usize,
}

impl Default for PointsFFI {
    fn default() -> Self {
        Self {
            x: std::ptr::null_mut(),
            y: std::ptr::null_mut(),
            predicted: std::ptr::null_mut(),
            id: std::ptr::null_mut(),
            len: 0,
        }
    }
}

/// Inference results (optional)
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct InferenceFFI {
    pub slope_std_error: f64,
    pub slope_t_value: f64,
    pub slope_p_value: f64,
    pub slope_ci_lower: f64,
    pub slope_ci_upper: f64,
    pub intercept_std_error: f64,
    pub intercept_t_value: f64,
    pub intercept_p_value: f64,
    pub intercept_ci_lower: f64,
    pub intercept_ci_upper: f64,
    pub residual_std_error: f64,
    /// F-statistic (NaN if not computed)
    pub f_statistic: f64,
    /// F p-value (NaN if not computed)
    pub f_pvalue: f64,
    pub confidence_level: f64,
}

impl Default for InferenceFFI {
    fn default() -> Self {
        Self {
            slope_std_error: f64::NAN,
            slope_t_value: f64::NAN,
            slope_p_value: f64::NAN,
            slope_ci_lower: f64::NAN,
            slope_ci_upper: f64::NAN,
            intercept_std_error: f64::NAN,
            intercept_t_value: f64::NAN,
            intercept_p_value: f64::NAN,
            intercept_ci_lower: f64::NAN,
            intercept_ci_upper: f64::NAN,
            residual_std_error: f64::NAN,
            f_statistic: f64::NAN,
            f_pvalue: f64::NAN,
            confidence_level: 0.95,
        }
    }
}

/// Normalized 1D Gaussian smoothing kernel.
///
/// Conventions:
/// - `ksize` is odd; `radius = ksize / 2`.
/// - `sigma <= 0` derives sigma from the size as
///   `0.3 * ((ksize - 1) * 0.5 - 1) + 0.8`.
/// - Sizes 1, 3, 5 and 7 with derived sigma use the exact binomial tables
///   (`[1, 4, 6, 4, 1] / 16` for size 5) instead of sampled exponentials.
/// - `weights` sum to 1.
#[derive(Debug, Clone)]
pub struct GaussianKernel1D {
    pub sigma: f32,
    pub radius: usize,
    pub weights: Vec<f32>,
}

const FIXED_1: [f32; 1] = [1.0];
const FIXED_3: [f32; 3] = [0.25, 0.5, 0.25];
const FIXED_5: [f32; 5] = [0.0625, 0.25, 0.375, 0.25, 0.0625];
const FIXED_7: [f32; 7] = [
    0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125,
];

impl GaussianKernel1D {
    pub fn new(ksize: usize, sigma: f32) -> Self {
        assert!(ksize % 2 == 1, "kernel size must be odd, got {ksize}");
        assert!(sigma.is_finite(), "sigma must be finite");

        let radius = ksize / 2;
        let derived = sigma <= 0.0;
        let sigma = if derived {
            0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8
        } else {
            sigma
        };

        if derived {
            let fixed: Option<&[f32]> = match ksize {
                1 => Some(&FIXED_1),
                3 => Some(&FIXED_3),
                5 => Some(&FIXED_5),
                7 => Some(&FIXED_7),
                _ => None,
            };
            if let Some(table) = fixed {
                return Self {
                    sigma,
                    radius,
                    weights: table.to_vec(),
                };
            }
        }

        let sigma2 = sigma * sigma;
        let mut weights: Vec<f32> = (0..ksize)
            .map(|i| {
                let x = i as f32 - radius as f32;
                (-(x * x) / (2.0 * sigma2)).exp()
            })
            .collect();

        let sum: f32 = weights.iter().sum();
        for w in &mut weights {
            *w /= sum;
        }

        Self {
            sigma,
            radius,
            weights,
        }
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

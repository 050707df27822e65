use wt_core::{BorderMode, Image, ImageView, pad_line};

use crate::kernels::GaussianKernel1D;

/// Correlates `signal` with an odd-length `kernel` centered on each sample.
///
/// Symmetric kernels make this identical to convolution.
pub fn convolve_f32(signal: &[f32], kernel: &[f32], border: BorderMode, out: &mut [f32]) {
    assert_eq!(out.len(), signal.len(), "out must match signal length");
    assert!(kernel.len() % 2 == 1, "kernel length must be odd");

    if signal.is_empty() {
        return;
    }

    let radius = kernel.len() / 2;
    let padded = pad_line(signal, radius, radius, border);
    for (i, out_i) in out.iter_mut().enumerate() {
        let window = &padded[i..i + kernel.len()];
        *out_i = window.iter().zip(kernel).map(|(&s, &k)| s * k).sum();
    }
}

/// Separable Gaussian smoothing with reflect-101 borders.
///
/// Rows are filtered first into an `f32` buffer, then columns; the result is
/// rounded to nearest and saturated to `u8` once at the end.
pub fn gaussian_blur_u8(src: &ImageView<'_, u8>, kernel: &GaussianKernel1D) -> Image<u8> {
    let (w, h) = (src.width(), src.height());
    if src.is_empty() {
        return Image::new_fill(w, h, 0u8);
    }

    let mut horiz = vec![0.0f32; w * h];
    let mut line = Vec::with_capacity(w.max(h));
    for (y, row) in src.rows().enumerate() {
        line.clear();
        line.extend(row.iter().map(|&v| v as f32));
        convolve_f32(
            &line,
            &kernel.weights,
            BorderMode::Reflect101,
            &mut horiz[y * w..(y + 1) * w],
        );
    }

    let mut out = vec![0u8; w * h];
    let mut col_out = vec![0.0f32; h];
    for x in 0..w {
        line.clear();
        line.extend((0..h).map(|y| horiz[y * w + x]));
        convolve_f32(&line, &kernel.weights, BorderMode::Reflect101, &mut col_out);
        for (y, &v) in col_out.iter().enumerate() {
            out[y * w + x] = v.round().clamp(0.0, 255.0) as u8;
        }
    }

    Image::from_vec(w, h, out).expect("blur output matches source size")
}

#[cfg(test)]
mod tests {
    use wt_core::{BorderMode, Image};

    use super::{convolve_f32, gaussian_blur_u8};
    use crate::kernels::GaussianKernel1D;

    #[test]
    fn impulse_response_reproduces_kernel() {
        let mut signal = vec![0.0f32; 9];
        signal[4] = 16.0;
        let k = GaussianKernel1D::new(5, 0.0);
        let mut out = vec![0.0f32; 9];
        convolve_f32(&signal, &k.weights, BorderMode::Reflect101, &mut out);

        assert_eq!(out, vec![0.0, 0.0, 1.0, 4.0, 6.0, 4.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn reflect_border_does_not_repeat_edge() {
        let signal = [16.0f32, 0.0, 0.0, 0.0];
        let k = GaussianKernel1D::new(3, 0.0);
        let mut out = vec![0.0f32; 4];
        convolve_f32(&signal, &k.weights, BorderMode::Reflect101, &mut out);

        // Reflect-101 sees [0, 16, 0, ...] around index 0.
        assert_eq!(out, vec![8.0, 4.0, 0.0, 0.0]);
    }

    #[test]
    fn constant_image_is_unchanged() {
        let img = Image::new_fill(12, 7, 173u8);
        let out = gaussian_blur_u8(&img.as_view(), &GaussianKernel1D::new(5, 0.0));
        assert!(out.data().iter().all(|&v| v == 173));
    }

    #[test]
    fn thin_line_spreads_over_five_columns() {
        let img = Image::from_fn(11, 5, |x, _| if x == 5 { 255u8 } else { 175 });
        let out = gaussian_blur_u8(&img.as_view(), &GaussianKernel1D::new(5, 0.0));

        // 175 + 80 * [1, 4, 6, 4, 1] / 16
        assert_eq!(&out.as_view().row(2)[2..9], &[175, 180, 195, 205, 195, 180, 175]);
    }
}

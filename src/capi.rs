/*
 * // Copyright (c) Radzivon Bartoshyk 11/2025. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
//! C entry points. Every failure mode, including panics, is reported as a
//! nonzero status; the output array contents are unspecified on failure.
//! Strides are signed and counted in elements of the array's own type. The
//! normalization factor is always a double and is narrowed on the
//! single-precision path.
use crate::ndim::{general_c2c_raw, general_c2r_raw, general_hartley_raw, general_r2c_raw};
use core::ffi::c_void;
use num_complex::Complex;
use std::panic::catch_unwind;
use std::slice::from_raw_parts;

/// # Safety
///
/// `shape`, `stride_in` and `stride_out` must point to `ndim` readable
/// elements, `axes` to `nax` readable elements, and the data pointers to
/// arrays consistent with the shape and strides in the selected precision.
#[no_mangle]
pub unsafe extern "C" fn packfft_complex(
    ndim: usize,
    shape: *const usize,
    stride_in: *const i64,
    stride_out: *const i64,
    nax: usize,
    axes: *const usize,
    forward: i32,
    data_in: *const c_void,
    data_out: *mut c_void,
    fct: f64,
    dp: i32,
) -> i32 {
    catch_unwind(move || {
        let shape = from_raw_parts(shape, ndim);
        let stride_in = from_raw_parts(stride_in, ndim);
        let stride_out = from_raw_parts(stride_out, ndim);
        let axes = from_raw_parts(axes, nax);
        let res = if dp != 0 {
            general_c2c_raw::<f64>(
                shape,
                stride_in,
                stride_out,
                axes,
                forward != 0,
                data_in as *const Complex<f64>,
                data_out as *mut Complex<f64>,
                fct,
            )
        } else {
            general_c2c_raw::<f32>(
                shape,
                stride_in,
                stride_out,
                axes,
                forward != 0,
                data_in as *const Complex<f32>,
                data_out as *mut Complex<f32>,
                fct as f32,
            )
        };
        i32::from(res.is_err())
    })
    .unwrap_or(1)
}

/// # Safety
///
/// Same contract as [`packfft_complex`], with real input data and complex
/// output holding `shape[axis]/2 + 1` elements along the transformed axis.
#[no_mangle]
pub unsafe extern "C" fn packfft_r2c(
    ndim: usize,
    shape: *const usize,
    stride_in: *const i64,
    stride_out: *const i64,
    axis: usize,
    data_in: *const c_void,
    data_out: *mut c_void,
    fct: f64,
    dp: i32,
) -> i32 {
    catch_unwind(move || {
        let shape = from_raw_parts(shape, ndim);
        let stride_in = from_raw_parts(stride_in, ndim);
        let stride_out = from_raw_parts(stride_out, ndim);
        let res = if dp != 0 {
            general_r2c_raw::<f64>(
                shape,
                stride_in,
                stride_out,
                axis,
                data_in as *const f64,
                data_out as *mut Complex<f64>,
                fct,
            )
        } else {
            general_r2c_raw::<f32>(
                shape,
                stride_in,
                stride_out,
                axis,
                data_in as *const f32,
                data_out as *mut Complex<f32>,
                fct as f32,
            )
        };
        i32::from(res.is_err())
    })
    .unwrap_or(1)
}

/// # Safety
///
/// Same contract as [`packfft_complex`]; `shape` describes the real output
/// array, and the complex input holds `shape[axis]/2 + 1` elements along the
/// transformed axis.
#[no_mangle]
pub unsafe extern "C" fn packfft_c2r(
    ndim: usize,
    shape: *const usize,
    stride_in: *const i64,
    stride_out: *const i64,
    axis: usize,
    data_in: *const c_void,
    data_out: *mut c_void,
    fct: f64,
    dp: i32,
) -> i32 {
    catch_unwind(move || {
        let shape = from_raw_parts(shape, ndim);
        let stride_in = from_raw_parts(stride_in, ndim);
        let stride_out = from_raw_parts(stride_out, ndim);
        let res = if dp != 0 {
            general_c2r_raw::<f64>(
                shape,
                stride_in,
                stride_out,
                axis,
                data_in as *const Complex<f64>,
                data_out as *mut f64,
                fct,
            )
        } else {
            general_c2r_raw::<f32>(
                shape,
                stride_in,
                stride_out,
                axis,
                data_in as *const Complex<f32>,
                data_out as *mut f32,
                fct as f32,
            )
        };
        i32::from(res.is_err())
    })
    .unwrap_or(1)
}

/// # Safety
///
/// Same contract as [`packfft_complex`], with real data on both sides and no
/// direction flag: the Hartley transform is its own inverse up to scaling.
#[no_mangle]
pub unsafe extern "C" fn packfft_hartley(
    ndim: usize,
    shape: *const usize,
    stride_in: *const i64,
    stride_out: *const i64,
    nax: usize,
    axes: *const usize,
    data_in: *const c_void,
    data_out: *mut c_void,
    fct: f64,
    dp: i32,
) -> i32 {
    catch_unwind(move || {
        let shape = from_raw_parts(shape, ndim);
        let stride_in = from_raw_parts(stride_in, ndim);
        let stride_out = from_raw_parts(stride_out, ndim);
        let axes = from_raw_parts(axes, nax);
        let res = if dp != 0 {
            general_hartley_raw::<f64>(
                shape,
                stride_in,
                stride_out,
                axes,
                data_in as *const f64,
                data_out as *mut f64,
                fct,
            )
        } else {
            general_hartley_raw::<f32>(
                shape,
                stride_in,
                stride_out,
                axes,
                data_in as *const f32,
                data_out as *mut f32,
                fct as f32,
            )
        };
        i32::from(res.is_err())
    })
    .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_complex_entry_roundtrip_f64() {
        let mut rng = rand::rng();
        let shape = [4usize, 6];
        let strides = [6i64, 1];
        let axes = [0usize, 1];
        let input: Vec<Complex<f64>> = (0..24)
            .map(|_| Complex::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)))
            .collect();
        let mut freq = vec![Complex::new(0.0, 0.0); 24];
        let mut back = vec![Complex::new(0.0, 0.0); 24];

        let status = unsafe {
            packfft_complex(
                2,
                shape.as_ptr(),
                strides.as_ptr(),
                strides.as_ptr(),
                2,
                axes.as_ptr(),
                1,
                input.as_ptr() as *const c_void,
                freq.as_mut_ptr() as *mut c_void,
                1.0,
                1,
            )
        };
        assert_eq!(status, 0);
        let status = unsafe {
            packfft_complex(
                2,
                shape.as_ptr(),
                strides.as_ptr(),
                strides.as_ptr(),
                2,
                axes.as_ptr(),
                0,
                freq.as_ptr() as *const c_void,
                back.as_mut_ptr() as *mut c_void,
                1.0 / 24.0,
                1,
            )
        };
        assert_eq!(status, 0);
        for (a, b) in back.iter().zip(input.iter()) {
            assert!((a.re - b.re).abs() < 1e-12 && (a.im - b.im).abs() < 1e-12);
        }
    }

    #[test]
    fn test_single_precision_path() {
        let shape = [8usize];
        let strides = [1i64];
        let axes = [0usize];
        let mut data = vec![Complex::new(0.0f32, 0.0f32); 8];
        data[0] = Complex::new(1.0, 0.0);
        let mut out = vec![Complex::new(0.0f32, 0.0f32); 8];
        let status = unsafe {
            packfft_complex(
                1,
                shape.as_ptr(),
                strides.as_ptr(),
                strides.as_ptr(),
                1,
                axes.as_ptr(),
                1,
                data.as_ptr() as *const c_void,
                out.as_mut_ptr() as *mut c_void,
                1.0,
                0,
            )
        };
        assert_eq!(status, 0);
        for v in out.iter() {
            assert!((v.re - 1.0).abs() < 1e-6 && v.im.abs() < 1e-6, "{v:?}");
        }
    }

    #[test]
    fn test_r2c_c2r_entries() {
        let mut rng = rand::rng();
        let n = 10usize;
        let shape = [n];
        let rstride = [1i64];
        let cstride = [1i64];
        let input: Vec<f64> = (0..n).map(|_| rng.random_range(-1.0..1.0)).collect();
        let mut spectrum = vec![Complex::new(0.0f64, 0.0); n / 2 + 1];
        let mut back = vec![0.0f64; n];

        let status = unsafe {
            packfft_r2c(
                1,
                shape.as_ptr(),
                rstride.as_ptr(),
                cstride.as_ptr(),
                0,
                input.as_ptr() as *const c_void,
                spectrum.as_mut_ptr() as *mut c_void,
                1.0,
                1,
            )
        };
        assert_eq!(status, 0);
        let status = unsafe {
            packfft_c2r(
                1,
                shape.as_ptr(),
                cstride.as_ptr(),
                rstride.as_ptr(),
                0,
                spectrum.as_ptr() as *const c_void,
                back.as_mut_ptr() as *mut c_void,
                1.0 / n as f64,
                1,
            )
        };
        assert_eq!(status, 0);
        for (a, b) in back.iter().zip(input.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_hartley_entry() {
        let mut rng = rand::rng();
        let shape = [4usize, 6];
        let strides = [6i64, 1];
        let axes = [0usize, 1];
        let input: Vec<f64> = (0..24).map(|_| rng.random_range(-1.0..1.0)).collect();
        let mut once = vec![0.0f64; 24];
        let mut twice = vec![0.0f64; 24];
        unsafe {
            assert_eq!(
                packfft_hartley(
                    2,
                    shape.as_ptr(),
                    strides.as_ptr(),
                    strides.as_ptr(),
                    2,
                    axes.as_ptr(),
                    input.as_ptr() as *const c_void,
                    once.as_mut_ptr() as *mut c_void,
                    1.0,
                    1,
                ),
                0
            );
            assert_eq!(
                packfft_hartley(
                    2,
                    shape.as_ptr(),
                    strides.as_ptr(),
                    strides.as_ptr(),
                    2,
                    axes.as_ptr(),
                    once.as_ptr() as *const c_void,
                    twice.as_mut_ptr() as *mut c_void,
                    1.0 / 24.0,
                    1,
                ),
                0
            );
        }
        for (a, b) in twice.iter().zip(input.iter()) {
            assert!((a - b).abs() < 1e-11);
        }
    }

    #[test]
    fn test_error_statuses() {
        let shape = [4usize];
        let strides = [1i64];
        let axes = [0usize, 0];
        let data = vec![Complex::new(0.0f64, 0.0); 4];
        let mut out = vec![Complex::new(0.0f64, 0.0); 4];
        // more axes than dimensions
        let status = unsafe {
            packfft_complex(
                1,
                shape.as_ptr(),
                strides.as_ptr(),
                strides.as_ptr(),
                2,
                axes.as_ptr(),
                1,
                data.as_ptr() as *const c_void,
                out.as_mut_ptr() as *mut c_void,
                1.0,
                1,
            )
        };
        assert_eq!(status, 1);
        // zero-length axis
        let zero_shape = [0usize];
        let status = unsafe {
            packfft_complex(
                1,
                zero_shape.as_ptr(),
                strides.as_ptr(),
                strides.as_ptr(),
                1,
                axes.as_ptr(),
                1,
                data.as_ptr() as *const c_void,
                out.as_mut_ptr() as *mut c_void,
                1.0,
                1,
            )
        };
        assert_eq!(status, 1);
    }
}

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
//! In-place 1-D FFTs for arbitrary lengths, extended to strided N-D arrays.
//!
//! Smooth lengths run through a mixed-radix FFTPACK-style decomposition with
//! hardcoded kernels for the small radices; lengths dominated by a large
//! prime factor fall back to Bluestein's chirp-z algorithm. Complex, real
//! (packed spectrum), and Hartley transforms are provided, plus C entry
//! points mirroring the slice API.
mod bluestein;
mod capi;
mod cfft;
mod err;
mod lengths;
mod ndim;
mod plan1d;
mod rfft;
mod trig;

pub use bluestein::BluesteinFft;
pub use cfft::CfftPlan;
pub use err::PackFftError;
pub use lengths::good_size;
pub use ndim::{c2c, c2r, hartley, r2c};
pub use plan1d::{ComplexPlan, RealPlan};
pub use rfft::RfftPlan;

#[cfg(test)]
mod tests {
    use crate::{ComplexPlan, RealPlan};
    use num_complex::Complex;

    #[test]
    fn test_everything_f32() {
        for n in 1..600usize {
            let mut data = vec![Complex::new(0.0019528865f32, 0.); n];
            for (i, chunk) in data.iter_mut().enumerate() {
                *chunk = Complex::new(
                    -0.19528865 + i as f32 * 0.001,
                    0.0019528865 - i as f32 * 0.001,
                );
            }
            let src = data.clone();
            let plan = ComplexPlan::<f32>::new(n).expect("Failed to make FFT!");
            plan.forward(&mut data, 1.0).unwrap();
            plan.backward(&mut data, 1.0 / n as f32).unwrap();
            data.iter().zip(src).enumerate().for_each(|(idx, (a, b))| {
                assert!(
                    (a.re - b.re).abs() < 1e-2,
                    "a_re {}, b_re {} at {idx}, for size {n}",
                    a.re,
                    b.re
                );
                assert!(
                    (a.im - b.im).abs() < 1e-2,
                    "a_im {}, b_im {} at {idx}, for size {n}",
                    a.im,
                    b.im
                );
            });
        }
    }

    #[test]
    fn test_everything_f64() {
        for n in 1..600usize {
            let mut data = vec![Complex::new(0.0019528865f64, 0.); n];
            for (i, chunk) in data.iter_mut().enumerate() {
                *chunk = Complex::new(
                    -0.19528865 + i as f64 * 0.001,
                    0.0019528865 - i as f64 * 0.001,
                );
            }
            let src = data.clone();
            let plan = ComplexPlan::<f64>::new(n).expect("Failed to make FFT!");
            plan.forward(&mut data, 1.0).unwrap();
            plan.backward(&mut data, 1.0 / n as f64).unwrap();
            data.iter().zip(src).enumerate().for_each(|(idx, (a, b))| {
                assert!(
                    (a.re - b.re).abs() < 1e-6,
                    "a_re {}, b_re {} at {idx}, for size {n}",
                    a.re,
                    b.re
                );
                assert!(
                    (a.im - b.im).abs() < 1e-6,
                    "a_im {}, b_im {} at {idx}, for size {n}",
                    a.im,
                    b.im
                );
            });
        }
    }

    #[test]
    fn test_everything_real_f64() {
        for n in 1..600usize {
            let mut data: Vec<f64> = (0..n).map(|i| -0.19528865 + i as f64 * 0.001).collect();
            let src = data.clone();
            let plan = RealPlan::<f64>::new(n).expect("Failed to make FFT!");
            plan.forward(&mut data, 1.0).unwrap();
            plan.backward(&mut data, 1.0 / n as f64).unwrap();
            data.iter().zip(src).enumerate().for_each(|(idx, (a, b))| {
                assert!(
                    (a - b).abs() < 1e-6,
                    "a {a}, b {b} at {idx}, for size {n}",
                );
            });
        }
    }
}

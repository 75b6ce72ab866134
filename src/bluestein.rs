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
use crate::cfft::{CfftPlan, special_mul};
use crate::err::{PackFftError, try_vec};
use crate::lengths::good_size;
use crate::trig::SinCos2PiByN;
use num_complex::Complex;
use num_traits::{AsPrimitive, Float, Zero};

/// Chirp-z transform for lengths whose factorization would make the direct
/// mixed-radix path slow. The length-n DFT becomes a cyclic convolution of
/// size `good_size(2n - 1)`, carried out by an owned inner complex plan.
pub struct BluesteinFft<T> {
    n: usize,
    n2: usize,
    plan: CfftPlan<T>,
    bk: Vec<Complex<T>>,
    bkf: Vec<Complex<T>>,
}

impl<T: Float + 'static> BluesteinFft<T>
where
    f64: AsPrimitive<T>,
{
    pub fn new(length: usize) -> Result<BluesteinFft<T>, PackFftError> {
        if length == 0 {
            return Err(PackFftError::ZeroSizedFft);
        }
        let n = length;
        let n2 = good_size(2 * n - 1);
        let plan = CfftPlan::new(n2)?;

        // b_k = exp(i pi k^2 / n); the squared index is accumulated mod 2n
        // through the identity k^2 = (k-1)^2 + 2k - 1 so precision never
        // depends on the magnitude of k^2.
        let tmp = SinCos2PiByN::new(2 * n, false)?;
        let mut bk = try_vec![Complex::<T>::zero(); n];
        bk[0] = Complex {
            re: T::one(),
            im: T::zero(),
        };
        let mut coeff = 0usize;
        for m in 1..n {
            coeff += 2 * m - 1;
            if coeff >= 2 * n {
                coeff -= 2 * n;
            }
            bk[m] = tmp.twiddle(coeff);
        }

        // zero-padded symmetric extension of b_k, transformed and pre-scaled
        // with the 1/n2 the inverse convolution FFT would otherwise need
        let xn2: T = (1.0 / n2 as f64).as_();
        let mut bkf = try_vec![Complex::<T>::zero(); n2];
        bkf[0] = bk[0] * xn2;
        for m in 1..n {
            let scaled = bk[m] * xn2;
            bkf[m] = scaled;
            bkf[n2 - m] = scaled;
        }
        plan.forward(&mut bkf, T::one())?;

        Ok(BluesteinFft {
            n,
            n2,
            plan,
            bk,
            bkf,
        })
    }

    pub fn length(&self) -> usize {
        self.n
    }

    #[cfg(test)]
    pub(crate) fn inner_length(&self) -> usize {
        self.n2
    }

    fn fft<const BWD: bool>(&self, c: &mut [Complex<T>], fct: T) -> Result<(), PackFftError> {
        let mut akf = try_vec![Complex::<T>::zero(); self.n2];
        for m in 0..self.n {
            akf[m] = special_mul::<T, BWD>(c[m], self.bk[m]);
        }

        self.plan.forward(&mut akf, T::one())?;

        // pointwise convolution; the inverse transform is expressed through
        // the forward plan by conjugating, hence the flipped direction here
        for (a, b) in akf.iter_mut().zip(self.bkf.iter()) {
            *a = if BWD {
                special_mul::<T, false>(*a, *b)
            } else {
                special_mul::<T, true>(*a, *b)
            };
        }

        self.plan.backward(&mut akf, T::one())?;

        for m in 0..self.n {
            c[m] = special_mul::<T, BWD>(akf[m], self.bk[m]) * fct;
        }
        Ok(())
    }

    pub fn forward(&self, c: &mut [Complex<T>], fct: T) -> Result<(), PackFftError> {
        if c.len() != self.n {
            return Err(PackFftError::InvalidInPlaceLength(self.n, c.len()));
        }
        self.fft::<false>(c, fct)
    }

    pub fn backward(&self, c: &mut [Complex<T>], fct: T) -> Result<(), PackFftError> {
        if c.len() != self.n {
            return Err(PackFftError::InvalidInPlaceLength(self.n, c.len()));
        }
        self.fft::<true>(c, fct)
    }

    /// Real input to the packed spectrum layout, via the complex transform.
    pub fn forward_real(&self, c: &mut [T], fct: T) -> Result<(), PackFftError> {
        if c.len() != self.n {
            return Err(PackFftError::InvalidInPlaceLength(self.n, c.len()));
        }
        let n = self.n;
        let mut tmp = try_vec![Complex::<T>::zero(); n];
        for (dst, src) in tmp.iter_mut().zip(c.iter()) {
            *dst = Complex {
                re: *src,
                im: T::zero(),
            };
        }
        self.fft::<false>(&mut tmp, fct)?;
        c[0] = tmp[0].re;
        for m in 1..n.div_ceil(2) {
            c[2 * m - 1] = tmp[m].re;
            c[2 * m] = tmp[m].im;
        }
        if n % 2 == 0 {
            c[n - 1] = tmp[n / 2].re;
        }
        Ok(())
    }

    /// Packed spectrum back to real samples: rebuild the Hermitian spectrum,
    /// run the complex transform backward, keep the real parts.
    pub fn backward_real(&self, c: &mut [T], fct: T) -> Result<(), PackFftError> {
        if c.len() != self.n {
            return Err(PackFftError::InvalidInPlaceLength(self.n, c.len()));
        }
        let n = self.n;
        let mut tmp = try_vec![Complex::<T>::zero(); n];
        tmp[0] = Complex {
            re: c[0],
            im: T::zero(),
        };
        for m in 1..n.div_ceil(2) {
            tmp[m] = Complex {
                re: c[2 * m - 1],
                im: c[2 * m],
            };
        }
        if n % 2 == 0 {
            tmp[n / 2] = Complex {
                re: c[n - 1],
                im: T::zero(),
            };
        }
        for m in 1..n.div_ceil(2) {
            tmp[n - m] = tmp[m].conj();
        }
        self.fft::<true>(&mut tmp, fct)?;
        for (dst, src) in c.iter_mut().zip(tmp.iter()) {
            *dst = src.re;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_inner_length_is_smooth() {
        for n in [13usize, 97, 101, 1031] {
            let plan = BluesteinFft::<f64>::new(n).unwrap();
            let n2 = plan.inner_length();
            assert!(n2 >= 2 * n - 1, "inner length {n2} too small for {n}");
            let mut m = n2;
            for p in [2usize, 3, 5, 7, 11] {
                while m % p == 0 {
                    m /= p;
                }
            }
            assert_eq!(m, 1, "inner length {n2} is not 11-smooth");
        }
    }

    #[test]
    fn test_prime_impulse_has_flat_magnitude() {
        let plan = BluesteinFft::<f64>::new(13).unwrap();
        let mut data = vec![Complex::new(0.0, 0.0); 13];
        data[0] = Complex::new(1.0, 0.0);
        plan.forward(&mut data, 1.0).unwrap();
        for v in data.iter() {
            assert!((v.norm() - 1.0).abs() < 1e-12, "{v:?}");
        }
    }

    #[test]
    fn test_prime_97_roundtrip() {
        let n = 97usize;
        let src: Vec<Complex<f64>> = (0..n)
            .map(|k| Complex::new((k as f64).sin(), (2.0 * k as f64).cos()))
            .collect();
        let plan = BluesteinFft::<f64>::new(n).unwrap();
        let mut data = src.clone();
        plan.forward(&mut data, 1.0).unwrap();
        plan.backward(&mut data, 1.0 / n as f64).unwrap();
        for (a, b) in data.iter().zip(src.iter()) {
            assert!(
                (a.re - b.re).abs() < 1e-12 && (a.im - b.im).abs() < 1e-12,
                "{a:?} vs {b:?}"
            );
        }
    }

    #[test]
    fn test_matches_direct_plan() {
        let mut rng = rand::rng();
        // Bluestein is valid for any length, so check it against the
        // mixed-radix path on composite sizes too
        for n in [5usize, 12, 13, 17, 29, 36] {
            let src: Vec<Complex<f64>> = (0..n)
                .map(|_| Complex::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)))
                .collect();
            let blue = BluesteinFft::<f64>::new(n).unwrap();
            let direct = CfftPlan::<f64>::new(n).unwrap();
            let mut a = src.clone();
            let mut b = src.clone();
            blue.forward(&mut a, 1.0).unwrap();
            direct.forward(&mut b, 1.0).unwrap();
            for (x, y) in a.iter().zip(b.iter()) {
                assert!(
                    (x.re - y.re).abs() < 1e-10 && (x.im - y.im).abs() < 1e-10,
                    "n={n}: {x:?} vs {y:?}"
                );
            }
        }
    }

    #[test]
    fn test_real_adaptors_roundtrip() {
        let mut rng = rand::rng();
        for n in [13usize, 14, 29, 97] {
            let src: Vec<f64> = (0..n).map(|_| rng.random_range(-1.0..1.0)).collect();
            let plan = BluesteinFft::<f64>::new(n).unwrap();
            let mut data = src.clone();
            plan.forward_real(&mut data, 1.0).unwrap();
            plan.backward_real(&mut data, 1.0 / n as f64).unwrap();
            for (a, b) in data.iter().zip(src.iter()) {
                assert!((a - b).abs() < 1e-12, "n={n}: {a} vs {b}");
            }
        }
    }

    #[test]
    fn test_real_forward_matches_packed_layout() {
        let mut rng = rand::rng();
        for n in [13usize, 14] {
            let src: Vec<f64> = (0..n).map(|_| rng.random_range(-1.0..1.0)).collect();
            let blue = BluesteinFft::<f64>::new(n).unwrap();
            let direct = crate::rfft::RfftPlan::<f64>::new(n).unwrap();
            let mut a = src.clone();
            let mut b = src.clone();
            blue.forward_real(&mut a, 1.0).unwrap();
            direct.forward(&mut b, 1.0).unwrap();
            for (x, y) in a.iter().zip(b.iter()) {
                assert!((x - y).abs() < 1e-10, "n={n}: {x} vs {y}");
            }
        }
    }
}

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
use crate::err::{PackFftError, try_vec};
use num_complex::Complex;
use num_traits::AsPrimitive;

/// Approximates `cos(pi*a) - 1` and `sin(pi*a)` for `a` in `[-0.25, 0.25]`.
/// Keeping the argument inside one octant bounds the cancellation error, so
/// the folded table below stays accurate to a few ulps.
#[inline]
fn sincosm1pi(a: f64) -> (f64, f64) {
    let s = a * a;
    let mut r: f64 = -1.0369917389758117e-4;
    r = r.mul_add(s, 1.9294935641298806e-3);
    r = r.mul_add(s, -2.5806887942825395e-2);
    r = r.mul_add(s, 2.3533063028328211e-1);
    r = r.mul_add(s, -1.3352627688538006e+0);
    r = r.mul_add(s, 4.0587121264167623e+0);
    r = r.mul_add(s, -4.9348022005446790e+0);
    let c = r * s;
    r = 4.6151442520157035e-4;
    r = r.mul_add(s, -7.3700183130883555e-3);
    r = r.mul_add(s, 8.2145868949323936e-2);
    r = r.mul_add(s, -5.9926452893214921e-1);
    r = r.mul_add(s, 2.5501640398732688e+0);
    r = r.mul_add(s, -5.1677127800499516e+0);
    let s3 = s * a;
    r = r * s3;
    let sn = a.mul_add(3.1415926535897931e+0, r);
    (c, sn)
}

// Writes (cos, sin) pairs for the first octant of 2*pi/den into
// res[off..], keeping cos-1 values transiently for the product recurrence.
fn calc_first_octant(den: usize, res: &mut [f64], off: usize) {
    let n = (den + 4) >> 3;
    if n == 0 {
        return;
    }
    res[off] = 1.0;
    res[off + 1] = 0.0;
    if n == 1 {
        return;
    }
    let l1 = (n as f64).sqrt() as usize;
    for i in 1..l1 {
        let (c, s) = sincosm1pi((2.0 * i as f64) / den as f64);
        res[off + 2 * i] = c;
        res[off + 2 * i + 1] = s;
    }
    let mut start = l1;
    while start < n {
        let (cs0, cs1) = sincosm1pi((2.0 * start as f64) / den as f64);
        res[off + 2 * start] = cs0 + 1.0;
        res[off + 2 * start + 1] = cs1;
        let mut end = l1;
        if start + end > n {
            end = n - start;
        }
        for i in 1..end {
            let csx0 = res[off + 2 * i];
            let csx1 = res[off + 2 * i + 1];
            res[off + 2 * (start + i)] = ((cs0 * csx0 - cs1 * csx1 + cs0) + csx0) + 1.0;
            res[off + 2 * (start + i) + 1] = (cs0 * csx1 + cs1 * csx0) + cs1 + csx1;
        }
        start += l1;
    }
    for i in 1..l1 {
        res[off + 2 * i] += 1.0;
    }
}

fn calc_first_quadrant(n: usize, res: &mut [f64]) {
    calc_first_octant(n << 1, res, n);
    let ndone = (n + 2) >> 2;
    let mut i = 0usize;
    let mut idx1 = 0usize;
    let mut idx2 = 2 * ndone - 2;
    while i + 1 < ndone {
        res[idx1] = res[n + 2 * i];
        res[idx1 + 1] = res[n + 2 * i + 1];
        res[idx2] = res[n + 2 * i + 3];
        res[idx2 + 1] = res[n + 2 * i + 2];
        i += 2;
        idx1 += 2;
        idx2 -= 2;
    }
    if i != ndone {
        res[idx1] = res[n + 2 * i];
        res[idx1 + 1] = res[n + 2 * i + 1];
    }
}

fn calc_first_half(n: usize, res: &mut [f64]) {
    let ndone = (n + 1) >> 1;
    let off = n - 1;
    calc_first_octant(n << 2, res, off);
    let i_n = n as i64;
    let mut i4 = 0i64;
    let mut i = 0usize;
    // octant 0
    while i4 <= i_n - i4 {
        res[2 * i] = res[off + 2 * i4 as usize];
        res[2 * i + 1] = res[off + 2 * i4 as usize + 1];
        i += 1;
        i4 += 4;
    }
    // octant 1
    while i4 - i_n <= 0 {
        let xm = (i_n - i4) as usize;
        res[2 * i] = res[off + 2 * xm + 1];
        res[2 * i + 1] = res[off + 2 * xm];
        i += 1;
        i4 += 4;
    }
    // octant 2
    while i4 <= 3 * i_n - i4 {
        let xm = (i4 - i_n) as usize;
        res[2 * i] = -res[off + 2 * xm + 1];
        res[2 * i + 1] = res[off + 2 * xm];
        i += 1;
        i4 += 4;
    }
    // octant 3
    while i < ndone {
        let xm = (2 * i_n - i4) as usize;
        res[2 * i] = -res[off + 2 * xm];
        res[2 * i + 1] = res[off + 2 * xm + 1];
        i += 1;
        i4 += 4;
    }
}

fn fill_first_quadrant(n: usize, res: &mut [f64]) {
    const HSQT2: f64 = 0.707106781186547524400844362104849;
    let quart = n >> 2;
    if (n & 7) == 0 {
        res[quart] = HSQT2;
        res[quart + 1] = HSQT2;
    }
    let mut i = 2usize;
    let mut j = 2 * quart - 2;
    while i < quart {
        res[j] = res[i + 1];
        res[j + 1] = res[i];
        i += 2;
        j -= 2;
    }
}

fn fill_first_half(n: usize, res: &mut [f64]) {
    let half = n >> 1;
    if (n & 3) == 0 {
        let mut i = 0usize;
        while i < half {
            res[i + half] = -res[i + 1];
            res[i + half + 1] = res[i];
            i += 2;
        }
    } else {
        let mut i = 2usize;
        let mut j = 2 * half - 2;
        while i < half {
            res[j] = -res[i];
            res[j + 1] = res[i + 1];
            i += 2;
            j -= 2;
        }
    }
}

fn fill_second_half(n: usize, res: &mut [f64]) {
    if (n & 1) == 0 {
        for i in 0..n {
            res[i + n] = -res[i];
        }
    } else {
        let mut i = 2usize;
        let mut j = 2 * n - 2;
        while i < n {
            res[j] = res[i];
            res[j + 1] = -res[i + 1];
            i += 2;
            j -= 2;
        }
    }
}

fn sincos_2pibyn_half(n: usize, res: &mut [f64]) {
    if (n & 3) == 0 {
        calc_first_octant(n, res, 0);
        fill_first_quadrant(n, res);
        fill_first_half(n, res);
    } else if (n & 1) == 0 {
        calc_first_quadrant(n, res);
        fill_first_half(n, res);
    } else {
        calc_first_half(n, res);
    }
}

/// Interleaved `(cos, sin)(2*pi*k/n)` table. `half` fills the first half of
/// the period only, which is all the real-valued plans ever read.
pub(crate) struct SinCos2PiByN {
    data: Vec<f64>,
}

impl SinCos2PiByN {
    pub(crate) fn new(n: usize, half: bool) -> Result<SinCos2PiByN, PackFftError> {
        let mut data = try_vec![0f64; 2 * n];
        sincos_2pibyn_half(n, &mut data);
        if !half {
            fill_second_half(n, &mut data);
        }
        Ok(SinCos2PiByN { data })
    }

    #[inline]
    pub(crate) fn cs(&self, k: usize) -> (f64, f64) {
        (self.data[2 * k], self.data[2 * k + 1])
    }

    #[inline]
    pub(crate) fn twiddle<T: Copy + 'static>(&self, k: usize) -> Complex<T>
    where
        f64: AsPrimitive<T>,
    {
        Complex {
            re: self.data[2 * k].as_(),
            im: self.data[2 * k + 1].as_(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_table(n: usize, half: bool) {
        let table = SinCos2PiByN::new(n, half).unwrap();
        let upto = if half { n.div_ceil(2) } else { n };
        for k in 0..upto {
            let angle = 2.0 * std::f64::consts::PI * k as f64 / n as f64;
            let (c, s) = table.cs(k);
            assert!(
                (c - angle.cos()).abs() < 2e-15,
                "cos mismatch at k={k} for n={n}: {c} vs {}",
                angle.cos()
            );
            assert!(
                (s - angle.sin()).abs() < 2e-15,
                "sin mismatch at k={k} for n={n}: {s} vs {}",
                angle.sin()
            );
        }
    }

    #[test]
    fn test_all_parity_paths() {
        // the four fill paths: multiples of 8 and 4, even, odd
        for n in [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 12, 16, 24, 97, 360, 1000, 1021] {
            check_table(n, false);
            check_table(n, true);
        }
    }

    #[test]
    fn test_exact_cardinal_points() {
        let table = SinCos2PiByN::new(8, false).unwrap();
        assert_eq!(table.cs(0), (1.0, 0.0));
        assert_eq!(table.cs(2), (0.0, 1.0));
        assert_eq!(table.cs(4), (-1.0, 0.0));
        let (c, s) = table.cs(1);
        assert_eq!(c, 0.707106781186547524400844362104849);
        assert_eq!(s, 0.707106781186547524400844362104849);
    }
}

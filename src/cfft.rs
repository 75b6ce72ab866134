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
use crate::trig::SinCos2PiByN;
use num_complex::Complex;
use num_integer::Roots;
use num_traits::{AsPrimitive, Float, Zero};

pub(crate) const MAX_FACTORS: usize = 25;

/// Twiddle multiply with the direction resolved at monomorphization time.
/// Twiddles are stored once with a positive-frequency sign; the forward
/// direction multiplies by the conjugate, the backward direction multiplies
/// plainly.
#[inline(always)]
pub(crate) fn special_mul<T: Float, const BWD: bool>(a: Complex<T>, b: Complex<T>) -> Complex<T> {
    if BWD {
        Complex {
            re: a.re * b.re - a.im * b.im,
            im: a.re * b.im + a.im * b.re,
        }
    } else {
        Complex {
            re: a.re * b.re + a.im * b.im,
            im: a.im * b.re - a.re * b.im,
        }
    }
}

#[inline(always)]
fn rot90<T: Float>(a: Complex<T>) -> Complex<T> {
    Complex { re: -a.im, im: a.re }
}

#[inline(always)]
fn rotm90<T: Float>(a: Complex<T>) -> Complex<T> {
    Complex { re: a.im, im: -a.re }
}

#[inline(always)]
fn pmc<T: Float>(c: Complex<T>, d: Complex<T>) -> (Complex<T>, Complex<T>) {
    (c + d, c - d)
}

fn pass2<T: Float, const BWD: bool>(
    ido: usize,
    l1: usize,
    cc: &[Complex<T>],
    ch: &mut [Complex<T>],
    wa: &[Complex<T>],
) {
    const CDIM: usize = 2;
    let cc_i = |a: usize, b: usize, c: usize| a + ido * (b + CDIM * c);
    let ch_i = |a: usize, b: usize, c: usize| a + ido * (b + l1 * c);

    if ido == 1 {
        for k in 0..l1 {
            let t0 = cc[cc_i(0, 0, k)];
            let t1 = cc[cc_i(0, 1, k)];
            ch[ch_i(0, k, 0)] = t0 + t1;
            ch[ch_i(0, k, 1)] = t0 - t1;
        }
    } else {
        for k in 0..l1 {
            let t0 = cc[cc_i(0, 0, k)];
            let t1 = cc[cc_i(0, 1, k)];
            ch[ch_i(0, k, 0)] = t0 + t1;
            ch[ch_i(0, k, 1)] = t0 - t1;
            for i in 1..ido {
                let c0 = cc[cc_i(i, 0, k)];
                let c1 = cc[cc_i(i, 1, k)];
                ch[ch_i(i, k, 0)] = c0 + c1;
                ch[ch_i(i, k, 1)] = special_mul::<T, BWD>(c0 - c1, wa[i - 1]);
            }
        }
    }
}

fn pass3<T: Float + 'static, const BWD: bool>(
    ido: usize,
    l1: usize,
    cc: &[Complex<T>],
    ch: &mut [Complex<T>],
    wa: &[Complex<T>],
) where
    f64: AsPrimitive<T>,
{
    const CDIM: usize = 3;
    let sign = if BWD { 1.0 } else { -1.0 };
    let tw1r: T = (-0.5f64).as_();
    let tw1i: T = (sign * 0.86602540378443864676).as_();

    let cc_i = |a: usize, b: usize, c: usize| a + ido * (b + CDIM * c);
    let ch_i = |a: usize, b: usize, c: usize| a + ido * (b + l1 * c);
    let wa_i = |x: usize, i: usize| (i - 1) + x * (ido - 1);

    let butterfly = |t0: Complex<T>, c1: Complex<T>, c2: Complex<T>| {
        let (t1, t2) = pmc(c1, c2);
        let ca = t0 + t1 * tw1r;
        let cb = rot90(t2 * tw1i);
        (t0 + t1, ca + cb, ca - cb)
    };

    if ido == 1 {
        for k in 0..l1 {
            let (y0, y1, y2) = butterfly(cc[cc_i(0, 0, k)], cc[cc_i(0, 1, k)], cc[cc_i(0, 2, k)]);
            ch[ch_i(0, k, 0)] = y0;
            ch[ch_i(0, k, 1)] = y1;
            ch[ch_i(0, k, 2)] = y2;
        }
    } else {
        for k in 0..l1 {
            let (y0, y1, y2) = butterfly(cc[cc_i(0, 0, k)], cc[cc_i(0, 1, k)], cc[cc_i(0, 2, k)]);
            ch[ch_i(0, k, 0)] = y0;
            ch[ch_i(0, k, 1)] = y1;
            ch[ch_i(0, k, 2)] = y2;
            for i in 1..ido {
                let (y0, da, db) =
                    butterfly(cc[cc_i(i, 0, k)], cc[cc_i(i, 1, k)], cc[cc_i(i, 2, k)]);
                ch[ch_i(i, k, 0)] = y0;
                ch[ch_i(i, k, 1)] = special_mul::<T, BWD>(da, wa[wa_i(0, i)]);
                ch[ch_i(i, k, 2)] = special_mul::<T, BWD>(db, wa[wa_i(1, i)]);
            }
        }
    }
}

fn pass4<T: Float, const BWD: bool>(
    ido: usize,
    l1: usize,
    cc: &[Complex<T>],
    ch: &mut [Complex<T>],
    wa: &[Complex<T>],
) {
    const CDIM: usize = 4;
    let cc_i = |a: usize, b: usize, c: usize| a + ido * (b + CDIM * c);
    let ch_i = |a: usize, b: usize, c: usize| a + ido * (b + l1 * c);
    let wa_i = |x: usize, i: usize| (i - 1) + x * (ido - 1);

    if ido == 1 {
        for k in 0..l1 {
            let (t2, t1) = pmc(cc[cc_i(0, 0, k)], cc[cc_i(0, 2, k)]);
            let (t3, mut t4) = pmc(cc[cc_i(0, 1, k)], cc[cc_i(0, 3, k)]);
            t4 = if BWD { rot90(t4) } else { rotm90(t4) };
            let (y0, y2) = pmc(t2, t3);
            let (y1, y3) = pmc(t1, t4);
            ch[ch_i(0, k, 0)] = y0;
            ch[ch_i(0, k, 1)] = y1;
            ch[ch_i(0, k, 2)] = y2;
            ch[ch_i(0, k, 3)] = y3;
        }
    } else {
        for k in 0..l1 {
            {
                let (t2, t1) = pmc(cc[cc_i(0, 0, k)], cc[cc_i(0, 2, k)]);
                let (t3, mut t4) = pmc(cc[cc_i(0, 1, k)], cc[cc_i(0, 3, k)]);
                t4 = if BWD { rot90(t4) } else { rotm90(t4) };
                let (y0, y2) = pmc(t2, t3);
                let (y1, y3) = pmc(t1, t4);
                ch[ch_i(0, k, 0)] = y0;
                ch[ch_i(0, k, 1)] = y1;
                ch[ch_i(0, k, 2)] = y2;
                ch[ch_i(0, k, 3)] = y3;
            }
            for i in 1..ido {
                let (t2, t1) = pmc(cc[cc_i(i, 0, k)], cc[cc_i(i, 2, k)]);
                let (t3, mut t4) = pmc(cc[cc_i(i, 1, k)], cc[cc_i(i, 3, k)]);
                t4 = if BWD { rot90(t4) } else { rotm90(t4) };
                let (y0, c3) = pmc(t2, t3);
                let (c2, c4) = pmc(t1, t4);
                ch[ch_i(i, k, 0)] = y0;
                ch[ch_i(i, k, 1)] = special_mul::<T, BWD>(c2, wa[wa_i(0, i)]);
                ch[ch_i(i, k, 2)] = special_mul::<T, BWD>(c3, wa[wa_i(1, i)]);
                ch[ch_i(i, k, 3)] = special_mul::<T, BWD>(c4, wa[wa_i(2, i)]);
            }
        }
    }
}

fn pass5<T: Float + 'static, const BWD: bool>(
    ido: usize,
    l1: usize,
    cc: &[Complex<T>],
    ch: &mut [Complex<T>],
    wa: &[Complex<T>],
) where
    f64: AsPrimitive<T>,
{
    const CDIM: usize = 5;
    let sign = if BWD { 1.0 } else { -1.0 };
    let tw1r: T = 0.3090169943749474241f64.as_();
    let tw1i: T = (sign * 0.95105651629515357212).as_();
    let tw2r: T = (-0.8090169943749474241f64).as_();
    let tw2i: T = (sign * 0.58778525229247312917).as_();

    let cc_i = |a: usize, b: usize, c: usize| a + ido * (b + CDIM * c);
    let ch_i = |a: usize, b: usize, c: usize| a + ido * (b + l1 * c);
    let wa_i = |x: usize, i: usize| (i - 1) + x * (ido - 1);

    let partstep = |t0: Complex<T>,
                    t1: Complex<T>,
                    t2: Complex<T>,
                    t3: Complex<T>,
                    t4: Complex<T>,
                    twar: T,
                    twbr: T,
                    twai: T,
                    twbi: T| {
        let ca = Complex {
            re: t0.re + twar * t1.re + twbr * t2.re,
            im: t0.im + twar * t1.im + twbr * t2.im,
        };
        let cb = Complex {
            re: -(twai * t4.im + twbi * t3.im),
            im: twai * t4.re + twbi * t3.re,
        };
        (ca + cb, ca - cb)
    };

    for k in 0..l1 {
        for i in 0..ido {
            let t0 = cc[cc_i(i, 0, k)];
            let (t1, t4) = pmc(cc[cc_i(i, 1, k)], cc[cc_i(i, 4, k)]);
            let (t2, t3) = pmc(cc[cc_i(i, 2, k)], cc[cc_i(i, 3, k)]);
            ch[ch_i(i, k, 0)] = Complex {
                re: t0.re + t1.re + t2.re,
                im: t0.im + t1.im + t2.im,
            };
            let (da1, da4) = partstep(t0, t1, t2, t3, t4, tw1r, tw2r, tw1i, tw2i);
            let (da2, da3) = partstep(t0, t1, t2, t3, t4, tw2r, tw1r, tw2i, -tw1i);
            if i == 0 {
                ch[ch_i(0, k, 1)] = da1;
                ch[ch_i(0, k, 4)] = da4;
                ch[ch_i(0, k, 2)] = da2;
                ch[ch_i(0, k, 3)] = da3;
            } else {
                ch[ch_i(i, k, 1)] = special_mul::<T, BWD>(da1, wa[wa_i(0, i)]);
                ch[ch_i(i, k, 4)] = special_mul::<T, BWD>(da4, wa[wa_i(3, i)]);
                ch[ch_i(i, k, 2)] = special_mul::<T, BWD>(da2, wa[wa_i(1, i)]);
                ch[ch_i(i, k, 3)] = special_mul::<T, BWD>(da3, wa[wa_i(2, i)]);
            }
        }
    }
}

fn pass7<T: Float + 'static, const BWD: bool>(
    ido: usize,
    l1: usize,
    cc: &[Complex<T>],
    ch: &mut [Complex<T>],
    wa: &[Complex<T>],
) where
    f64: AsPrimitive<T>,
{
    const CDIM: usize = 7;
    let sign = if BWD { 1.0 } else { -1.0 };
    let tw1r: T = 0.623489801858733530525f64.as_();
    let tw1i: T = (sign * 0.7818314824680298087084).as_();
    let tw2r: T = (-0.222520933956314404289f64).as_();
    let tw2i: T = (sign * 0.9749279121818236070181).as_();
    let tw3r: T = (-0.9009688679024191262361f64).as_();
    let tw3i: T = (sign * 0.4338837391175581204758).as_();

    let cc_i = |a: usize, b: usize, c: usize| a + ido * (b + CDIM * c);
    let ch_i = |a: usize, b: usize, c: usize| a + ido * (b + l1 * c);
    let wa_i = |x: usize, i: usize| (i - 1) + x * (ido - 1);

    let partstep = |t1: Complex<T>,
                    t2: Complex<T>,
                    t3: Complex<T>,
                    t4: Complex<T>,
                    t5: Complex<T>,
                    t6: Complex<T>,
                    t7: Complex<T>,
                    x1: T,
                    x2: T,
                    x3: T,
                    y1: T,
                    y2: T,
                    y3: T| {
        let ca = Complex {
            re: t1.re + x1 * t2.re + x2 * t3.re + x3 * t4.re,
            im: t1.im + x1 * t2.im + x2 * t3.im + x3 * t4.im,
        };
        let cb = Complex {
            re: -(y1 * t7.im + y2 * t6.im + y3 * t5.im),
            im: y1 * t7.re + y2 * t6.re + y3 * t5.re,
        };
        (ca + cb, ca - cb)
    };

    for k in 0..l1 {
        for i in 0..ido {
            let t1 = cc[cc_i(i, 0, k)];
            let (t2, t7) = pmc(cc[cc_i(i, 1, k)], cc[cc_i(i, 6, k)]);
            let (t3, t6) = pmc(cc[cc_i(i, 2, k)], cc[cc_i(i, 5, k)]);
            let (t4, t5) = pmc(cc[cc_i(i, 3, k)], cc[cc_i(i, 4, k)]);
            ch[ch_i(i, k, 0)] = Complex {
                re: t1.re + t2.re + t3.re + t4.re,
                im: t1.im + t2.im + t3.im + t4.im,
            };
            let (d1, d6) = partstep(t1, t2, t3, t4, t5, t6, t7, tw1r, tw2r, tw3r, tw1i, tw2i, tw3i);
            let (d2, d5) = partstep(
                t1, t2, t3, t4, t5, t6, t7, tw2r, tw3r, tw1r, tw2i, -tw3i, -tw1i,
            );
            let (d3, d4) = partstep(
                t1, t2, t3, t4, t5, t6, t7, tw3r, tw1r, tw2r, tw3i, -tw1i, tw2i,
            );
            if i == 0 {
                ch[ch_i(0, k, 1)] = d1;
                ch[ch_i(0, k, 6)] = d6;
                ch[ch_i(0, k, 2)] = d2;
                ch[ch_i(0, k, 5)] = d5;
                ch[ch_i(0, k, 3)] = d3;
                ch[ch_i(0, k, 4)] = d4;
            } else {
                ch[ch_i(i, k, 1)] = special_mul::<T, BWD>(d1, wa[wa_i(0, i)]);
                ch[ch_i(i, k, 6)] = special_mul::<T, BWD>(d6, wa[wa_i(5, i)]);
                ch[ch_i(i, k, 2)] = special_mul::<T, BWD>(d2, wa[wa_i(1, i)]);
                ch[ch_i(i, k, 5)] = special_mul::<T, BWD>(d5, wa[wa_i(4, i)]);
                ch[ch_i(i, k, 3)] = special_mul::<T, BWD>(d3, wa[wa_i(2, i)]);
                ch[ch_i(i, k, 4)] = special_mul::<T, BWD>(d4, wa[wa_i(3, i)]);
            }
        }
    }
}

fn pass11<T: Float + 'static, const BWD: bool>(
    ido: usize,
    l1: usize,
    cc: &[Complex<T>],
    ch: &mut [Complex<T>],
    wa: &[Complex<T>],
) where
    f64: AsPrimitive<T>,
{
    const CDIM: usize = 11;
    let sign = if BWD { 1.0 } else { -1.0 };
    let tw1r: T = 0.8412535328311811688618f64.as_();
    let tw1i: T = (sign * 0.5406408174555975821076).as_();
    let tw2r: T = 0.4154150130018864255293f64.as_();
    let tw2i: T = (sign * 0.9096319953545183714117).as_();
    let tw3r: T = (-0.1423148382732851404438f64).as_();
    let tw3i: T = (sign * 0.9898214418809327323761).as_();
    let tw4r: T = (-0.6548607339452850640569f64).as_();
    let tw4i: T = (sign * 0.755749574354258283774).as_();
    let tw5r: T = (-0.9594929736144973898904f64).as_();
    let tw5i: T = (sign * 0.2817325568414296977114).as_();

    let cc_i = |a: usize, b: usize, c: usize| a + ido * (b + CDIM * c);
    let ch_i = |a: usize, b: usize, c: usize| a + ido * (b + l1 * c);
    let wa_i = |x: usize, i: usize| (i - 1) + x * (ido - 1);

    #[allow(clippy::too_many_arguments)]
    let partstep = |t: &[Complex<T>; 11], x: [T; 5], y: [T; 5]| {
        let ca = Complex {
            re: t[0].re
                + x[0] * t[1].re
                + x[1] * t[2].re
                + x[2] * t[3].re
                + x[3] * t[4].re
                + x[4] * t[5].re,
            im: t[0].im
                + x[0] * t[1].im
                + x[1] * t[2].im
                + x[2] * t[3].im
                + x[3] * t[4].im
                + x[4] * t[5].im,
        };
        let cb = Complex {
            re: -(y[0] * t[10].im
                + y[1] * t[9].im
                + y[2] * t[8].im
                + y[3] * t[7].im
                + y[4] * t[6].im),
            im: y[0] * t[10].re
                + y[1] * t[9].re
                + y[2] * t[8].re
                + y[3] * t[7].re
                + y[4] * t[6].re,
        };
        (ca + cb, ca - cb)
    };

    for k in 0..l1 {
        for i in 0..ido {
            let t1 = cc[cc_i(i, 0, k)];
            let (t2, t11) = pmc(cc[cc_i(i, 1, k)], cc[cc_i(i, 10, k)]);
            let (t3, t10) = pmc(cc[cc_i(i, 2, k)], cc[cc_i(i, 9, k)]);
            let (t4, t9) = pmc(cc[cc_i(i, 3, k)], cc[cc_i(i, 8, k)]);
            let (t5, t8) = pmc(cc[cc_i(i, 4, k)], cc[cc_i(i, 7, k)]);
            let (t6, t7) = pmc(cc[cc_i(i, 5, k)], cc[cc_i(i, 6, k)]);
            let t = [t1, t2, t3, t4, t5, t6, t7, t8, t9, t10, t11];
            ch[ch_i(i, k, 0)] = Complex {
                re: t1.re + t2.re + t3.re + t4.re + t5.re + t6.re,
                im: t1.im + t2.im + t3.im + t4.im + t5.im + t6.im,
            };
            let rows = [
                (1usize, 10usize, [tw1r, tw2r, tw3r, tw4r, tw5r], [
                    tw1i, tw2i, tw3i, tw4i, tw5i,
                ]),
                (2, 9, [tw2r, tw4r, tw5r, tw3r, tw1r], [
                    tw2i, tw4i, -tw5i, -tw3i, -tw1i,
                ]),
                (3, 8, [tw3r, tw5r, tw2r, tw1r, tw4r], [
                    tw3i, -tw5i, -tw2i, tw1i, tw4i,
                ]),
                (4, 7, [tw4r, tw3r, tw1r, tw5r, tw2r], [
                    tw4i, -tw3i, tw1i, tw5i, -tw2i,
                ]),
                (5, 6, [tw5r, tw1r, tw4r, tw2r, tw3r], [
                    tw5i, -tw1i, tw4i, -tw2i, tw3i,
                ]),
            ];
            for (u1, u2, x, y) in rows {
                let (da, db) = partstep(&t, x, y);
                if i == 0 {
                    ch[ch_i(0, k, u1)] = da;
                    ch[ch_i(0, k, u2)] = db;
                } else {
                    ch[ch_i(i, k, u1)] = special_mul::<T, BWD>(da, wa[wa_i(u1 - 1, i)]);
                    ch[ch_i(i, k, u2)] = special_mul::<T, BWD>(db, wa[wa_i(u2 - 1, i)]);
                }
            }
        }
    }
}

// Generic radix for prime factors above 11. Accumulates ipph = (p+1)/2
// partial sums using the conjugate symmetry of the DFT-of-unity row, then
// shuffles and twiddles in place; the final data lands back in `cc`.
fn passg<T: Float + 'static, const BWD: bool>(
    ido: usize,
    ip: usize,
    l1: usize,
    cc: &mut [Complex<T>],
    ch: &mut [Complex<T>],
    wa: &[Complex<T>],
    csarr: &[Complex<T>],
) -> Result<(), PackFftError>
where
    f64: AsPrimitive<T>,
{
    let cdim = ip;
    let ipph = (ip + 1) / 2;
    let idl1 = ido * l1;

    let mut wal = try_vec![Complex::<T>::zero(); ip];
    wal[0] = Complex {
        re: T::one(),
        im: T::zero(),
    };
    for i in 1..ip {
        wal[i] = Complex {
            re: csarr[i].re,
            im: if BWD { csarr[i].im } else { -csarr[i].im },
        };
    }

    for k in 0..l1 {
        for i in 0..ido {
            ch[i + ido * k] = cc[i + ido * (cdim * k)];
        }
    }
    {
        let mut j = 1;
        let mut jc = ip - 1;
        while j < ipph {
            for k in 0..l1 {
                for i in 0..ido {
                    let (a, b) = pmc(cc[i + ido * (j + cdim * k)], cc[i + ido * (jc + cdim * k)]);
                    ch[i + ido * (k + l1 * j)] = a;
                    ch[i + ido * (k + l1 * jc)] = b;
                }
            }
            j += 1;
            jc -= 1;
        }
    }
    for k in 0..l1 {
        for i in 0..ido {
            let mut tmp = ch[i + ido * k];
            for j in 1..ipph {
                tmp = tmp + ch[i + ido * (k + l1 * j)];
            }
            cc[i + ido * k] = tmp;
        }
    }

    {
        let mut l = 1;
        let mut lc = ip - 1;
        while l < ipph {
            for ik in 0..idl1 {
                let ch0 = ch[ik];
                let ch1 = ch[ik + idl1];
                let ch2 = ch[ik + idl1 * 2];
                let chn1 = ch[ik + idl1 * (ip - 1)];
                let chn2 = ch[ik + idl1 * (ip - 2)];
                cc[ik + idl1 * l] = Complex {
                    re: ch0.re + wal[l].re * ch1.re + wal[2 * l].re * ch2.re,
                    im: ch0.im + wal[l].re * ch1.im + wal[2 * l].re * ch2.im,
                };
                cc[ik + idl1 * lc] = Complex {
                    re: -wal[l].im * chn1.im - wal[2 * l].im * chn2.im,
                    im: wal[l].im * chn1.re + wal[2 * l].im * chn2.re,
                };
            }

            let mut iwal = 2 * l;
            let mut j = 3;
            let mut jc = ip - 3;
            while j + 1 < ipph {
                iwal += l;
                if iwal > ip {
                    iwal -= ip;
                }
                let xwal = wal[iwal];
                iwal += l;
                if iwal > ip {
                    iwal -= ip;
                }
                let xwal2 = wal[iwal];
                for ik in 0..idl1 {
                    let chj = ch[ik + idl1 * j];
                    let chj1 = ch[ik + idl1 * (j + 1)];
                    let chjc = ch[ik + idl1 * jc];
                    let chjc1 = ch[ik + idl1 * (jc - 1)];
                    let cl = cc[ik + idl1 * l];
                    let clc = cc[ik + idl1 * lc];
                    cc[ik + idl1 * l] = Complex {
                        re: cl.re + chj.re * xwal.re + chj1.re * xwal2.re,
                        im: cl.im + chj.im * xwal.re + chj1.im * xwal2.re,
                    };
                    cc[ik + idl1 * lc] = Complex {
                        re: clc.re - chjc.im * xwal.im - chjc1.im * xwal2.im,
                        im: clc.im + chjc.re * xwal.im + chjc1.re * xwal2.im,
                    };
                }
                j += 2;
                jc -= 2;
            }
            while j < ipph {
                iwal += l;
                if iwal > ip {
                    iwal -= ip;
                }
                let xwal = wal[iwal];
                for ik in 0..idl1 {
                    let chj = ch[ik + idl1 * j];
                    let chjc = ch[ik + idl1 * jc];
                    let cl = cc[ik + idl1 * l];
                    let clc = cc[ik + idl1 * lc];
                    cc[ik + idl1 * l] = Complex {
                        re: cl.re + chj.re * xwal.re,
                        im: cl.im + chj.im * xwal.re,
                    };
                    cc[ik + idl1 * lc] = Complex {
                        re: clc.re - chjc.im * xwal.im,
                        im: clc.im + chjc.re * xwal.im,
                    };
                }
                j += 1;
                jc -= 1;
            }
            l += 1;
            lc -= 1;
        }
    }

    // shuffling and twiddling
    if ido == 1 {
        let mut j = 1;
        let mut jc = ip - 1;
        while j < ipph {
            for ik in 0..idl1 {
                let (a, b) = pmc(cc[ik + idl1 * j], cc[ik + idl1 * jc]);
                cc[ik + idl1 * j] = a;
                cc[ik + idl1 * jc] = b;
            }
            j += 1;
            jc -= 1;
        }
    } else {
        let mut j = 1;
        let mut jc = ip - 1;
        while j < ipph {
            for k in 0..l1 {
                let (a, b) = pmc(cc[ido * (k + l1 * j)], cc[ido * (k + l1 * jc)]);
                cc[ido * (k + l1 * j)] = a;
                cc[ido * (k + l1 * jc)] = b;
                for i in 1..ido {
                    let (x1, x2) = pmc(cc[i + ido * (k + l1 * j)], cc[i + ido * (k + l1 * jc)]);
                    let idij = (j - 1) * (ido - 1) + i - 1;
                    cc[i + ido * (k + l1 * j)] = special_mul::<T, BWD>(x1, wa[idij]);
                    let idij = (jc - 1) * (ido - 1) + i - 1;
                    cc[i + ido * (k + l1 * jc)] = special_mul::<T, BWD>(x2, wa[idij]);
                }
            }
            j += 1;
            jc -= 1;
        }
    }
    Ok(())
}

#[derive(Clone, Copy, Default)]
pub(crate) struct Factor {
    pub(crate) fct: usize,
    pub(crate) tw: usize,
    pub(crate) tws: usize,
}

/// Mixed-radix FFTPACK-style plan for complex data of a fixed length.
///
/// Factorization, twiddle tables and stage order are computed once at
/// construction; `forward`/`backward` reuse the same tables with the
/// direction resolved in the kernels.
pub struct CfftPlan<T> {
    length: usize,
    fct: Vec<Factor>,
    mem: Vec<Complex<T>>,
}

// Shared by the real plan as well: both extract fours first, then move the
// lone two to the front, then take odd primes in ascending order.
pub(crate) fn factorize(length: usize) -> Result<Vec<Factor>, PackFftError> {
    fn push(fct: &mut Vec<Factor>, length: usize, f: usize) -> Result<(), PackFftError> {
        if fct.len() >= MAX_FACTORS {
            return Err(PackFftError::TooManyFactors(length));
        }
        fct.push(Factor {
            fct: f,
            tw: 0,
            tws: 0,
        });
        Ok(())
    }

    let mut fct = Vec::new();
    let mut len = length;
    while len % 4 == 0 {
        push(&mut fct, length, 4)?;
        len >>= 2;
    }
    if len % 2 == 0 {
        len >>= 1;
        // factor 2 should be at the front of the factor list
        push(&mut fct, length, 2)?;
        let last = fct.len() - 1;
        fct.swap(0, last);
    }
    let mut maxl = len.sqrt() + 1;
    let mut divisor = 3usize;
    while len > 1 && divisor < maxl {
        if len % divisor == 0 {
            while len % divisor == 0 {
                push(&mut fct, length, divisor)?;
                len /= divisor;
            }
            maxl = len.sqrt() + 1;
        }
        divisor += 2;
    }
    if len > 1 {
        push(&mut fct, length, len)?;
    }
    Ok(fct)
}

impl<T: Float + 'static> CfftPlan<T>
where
    f64: AsPrimitive<T>,
{
    pub fn new(length: usize) -> Result<CfftPlan<T>, PackFftError> {
        if length == 0 {
            return Err(PackFftError::ZeroSizedFft);
        }
        if length == 1 {
            return Ok(CfftPlan {
                length,
                fct: Vec::new(),
                mem: Vec::new(),
            });
        }
        let mut fct = factorize(length)?;

        let mut twsize = 0usize;
        {
            let mut l1 = 1usize;
            for f in fct.iter() {
                let ip = f.fct;
                let ido = length / (l1 * ip);
                twsize += (ip - 1) * (ido - 1);
                if ip > 11 {
                    twsize += ip;
                }
                l1 *= ip;
            }
        }
        let mut mem = try_vec![Complex::<T>::zero(); twsize];

        let twid = SinCos2PiByN::new(length, false)?;
        let mut l1 = 1usize;
        let mut memofs = 0usize;
        for f in fct.iter_mut() {
            let ip = f.fct;
            let ido = length / (l1 * ip);
            f.tw = memofs;
            memofs += (ip - 1) * (ido - 1);
            for j in 1..ip {
                for i in 1..ido {
                    mem[f.tw + (j - 1) * (ido - 1) + i - 1] = twid.twiddle(j * l1 * i);
                }
            }
            if ip > 11 {
                f.tws = memofs;
                memofs += ip;
                for (j, dst) in mem[f.tws..f.tws + ip].iter_mut().enumerate() {
                    *dst = twid.twiddle(j * l1 * ido);
                }
            }
            l1 *= ip;
        }

        Ok(CfftPlan { length, fct, mem })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub(crate) fn factors(&self) -> Vec<usize> {
        self.fct.iter().map(|f| f.fct).collect()
    }

    pub fn forward(&self, c: &mut [Complex<T>], fct: T) -> Result<(), PackFftError> {
        self.pass_all::<false>(c, fct)
    }

    pub fn backward(&self, c: &mut [Complex<T>], fct: T) -> Result<(), PackFftError> {
        self.pass_all::<true>(c, fct)
    }

    fn pass_all<const BWD: bool>(&self, c: &mut [Complex<T>], fct: T) -> Result<(), PackFftError> {
        if c.len() != self.length {
            return Err(PackFftError::InvalidInPlaceLength(self.length, c.len()));
        }
        if self.length == 1 {
            c[0] = c[0] * fct;
            return Ok(());
        }
        let mut ch = try_vec![Complex::<T>::zero(); self.length];
        let mut l1 = 1usize;
        let mut in_ch = false;
        for f in self.fct.iter() {
            let ip = f.fct;
            let l2 = ip * l1;
            let ido = self.length / l2;
            let tw = &self.mem[f.tw..f.tw + (ip - 1) * (ido - 1)];
            let generic = !matches!(ip, 2 | 3 | 4 | 5 | 7 | 11);
            {
                let (p1, p2): (&mut [Complex<T>], &mut [Complex<T>]) = if in_ch {
                    (ch.as_mut_slice(), &mut *c)
                } else {
                    (&mut *c, ch.as_mut_slice())
                };
                match ip {
                    4 => pass4::<T, BWD>(ido, l1, p1, p2, tw),
                    2 => pass2::<T, BWD>(ido, l1, p1, p2, tw),
                    3 => pass3::<T, BWD>(ido, l1, p1, p2, tw),
                    5 => pass5::<T, BWD>(ido, l1, p1, p2, tw),
                    7 => pass7::<T, BWD>(ido, l1, p1, p2, tw),
                    11 => pass11::<T, BWD>(ido, l1, p1, p2, tw),
                    _ => {
                        let tws = &self.mem[f.tws..f.tws + ip];
                        passg::<T, BWD>(ido, ip, l1, p1, p2, tw, tws)?;
                    }
                }
            }
            // the generic radix shuffles back into its input buffer
            if !generic {
                in_ch = !in_ch;
            }
            l1 = l2;
        }
        if in_ch {
            if fct != T::one() {
                for (dst, src) in c.iter_mut().zip(ch.iter()) {
                    *dst = *src * fct;
                }
            } else {
                c.copy_from_slice(&ch);
            }
        } else if fct != T::one() {
            for v in c.iter_mut() {
                *v = *v * fct;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn reference_dft(input: &[Complex<f64>], forward: bool) -> Vec<Complex<f64>> {
        let n = input.len();
        let sign = if forward { -1.0 } else { 1.0 };
        (0..n)
            .map(|k| {
                let mut sum = Complex::new(0.0, 0.0);
                for (m, x) in input.iter().enumerate() {
                    let ang = sign * 2.0 * std::f64::consts::PI * (k * m % n) as f64 / n as f64;
                    sum += x * Complex::new(ang.cos(), ang.sin());
                }
                sum
            })
            .collect()
    }

    fn random_signal(n: usize) -> Vec<Complex<f64>> {
        let mut rng = rand::rng();
        (0..n)
            .map(|_| Complex::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)))
            .collect()
    }

    #[test]
    fn test_single_element() {
        let plan = CfftPlan::<f64>::new(1).unwrap();
        let mut data = vec![Complex::new(3.0, 4.0)];
        plan.forward(&mut data, 0.5).unwrap();
        assert_eq!(data[0], Complex::new(1.5, 2.0));
        plan.backward(&mut data, 2.0).unwrap();
        assert_eq!(data[0], Complex::new(3.0, 4.0));
    }

    #[test]
    fn test_impulse_len4() {
        let plan = CfftPlan::<f64>::new(4).unwrap();
        let mut data = vec![Complex::new(0.0, 0.0); 4];
        data[0] = Complex::new(1.0, 0.0);
        plan.forward(&mut data, 1.0).unwrap();
        for v in data.iter() {
            assert!((v.re - 1.0).abs() < 1e-15 && v.im.abs() < 1e-15, "{v:?}");
        }
        plan.backward(&mut data, 0.25).unwrap();
        assert!((data[0].re - 1.0).abs() < 1e-15);
        for v in data.iter().skip(1) {
            assert!(v.re.abs() < 1e-15 && v.im.abs() < 1e-15);
        }
    }

    #[test]
    fn test_factorization() {
        for n in 2..600usize {
            let plan = CfftPlan::<f64>::new(n).unwrap();
            let factors = plan.factors();
            assert_eq!(factors.iter().product::<usize>(), n, "factors of {n}");
            if n % 2 == 0 {
                assert!(
                    factors[0] == 2 || factors[0] == 4,
                    "even length {n} must lead with 2 or 4, got {factors:?}"
                );
            }
            let twos = factors.iter().filter(|&&f| f == 2).count();
            assert!(twos <= 1, "at most one factor of 2 for {n}: {factors:?}");
            if twos == 1 {
                assert_eq!(factors[0], 2, "factor 2 must be first for {n}: {factors:?}");
            }
        }
    }

    #[test]
    fn test_matches_reference_dft() {
        // covers every hardcoded radix plus the generic one, including a
        // generic stage with ido > 1 (169 = 13 * 13)
        for n in [
            2usize, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 20, 22, 25, 26, 28, 33,
            35, 39, 44, 49, 121, 169,
        ] {
            let input = random_signal(n);
            let expected = reference_dft(&input, true);
            let plan = CfftPlan::<f64>::new(n).unwrap();
            let mut data = input.clone();
            plan.forward(&mut data, 1.0).unwrap();
            for (idx, (a, b)) in data.iter().zip(expected.iter()).enumerate() {
                assert!(
                    (a.re - b.re).abs() < 1e-9 && (a.im - b.im).abs() < 1e-9,
                    "forward mismatch at {idx} for n={n}: {a:?} vs {b:?}"
                );
            }
            let expected_b = reference_dft(&input, false);
            let mut data = input.clone();
            plan.backward(&mut data, 1.0).unwrap();
            for (idx, (a, b)) in data.iter().zip(expected_b.iter()).enumerate() {
                assert!(
                    (a.re - b.re).abs() < 1e-9 && (a.im - b.im).abs() < 1e-9,
                    "backward mismatch at {idx} for n={n}: {a:?} vs {b:?}"
                );
            }
        }
    }

    #[test]
    fn test_roundtrip_f64() {
        for n in 1..250usize {
            let src = random_signal(n);
            let mut data = src.clone();
            let plan = CfftPlan::<f64>::new(n).unwrap();
            plan.forward(&mut data, 1.0).unwrap();
            plan.backward(&mut data, 1.0 / n as f64).unwrap();
            for (a, b) in data.iter().zip(src.iter()) {
                assert!(
                    (a.re - b.re).abs() < 1e-10 && (a.im - b.im).abs() < 1e-10,
                    "roundtrip failed for n={n}: {a:?} vs {b:?}"
                );
            }
        }
    }

    #[test]
    fn test_roundtrip_f32() {
        let mut rng = rand::rng();
        for n in 1..250usize {
            let src: Vec<Complex<f32>> = (0..n)
                .map(|_| Complex::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)))
                .collect();
            let mut data = src.clone();
            let plan = CfftPlan::<f32>::new(n).unwrap();
            plan.forward(&mut data, 1.0).unwrap();
            plan.backward(&mut data, 1.0 / n as f32).unwrap();
            for (a, b) in data.iter().zip(src.iter()) {
                assert!(
                    (a.re - b.re).abs() < 1e-3 && (a.im - b.im).abs() < 1e-3,
                    "roundtrip failed for n={n}: {a:?} vs {b:?}"
                );
            }
        }
    }

    #[test]
    fn test_zero_length_rejected() {
        assert!(matches!(
            CfftPlan::<f64>::new(0),
            Err(PackFftError::ZeroSizedFft)
        ));
    }

    #[test]
    fn test_wrong_buffer_length() {
        let plan = CfftPlan::<f64>::new(8).unwrap();
        let mut data = vec![Complex::new(0.0, 0.0); 7];
        assert!(matches!(
            plan.forward(&mut data, 1.0),
            Err(PackFftError::InvalidInPlaceLength(8, 7))
        ));
    }
}

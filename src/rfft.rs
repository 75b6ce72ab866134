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
use crate::cfft::{Factor, factorize};
use crate::err::{PackFftError, try_vec};
use crate::trig::SinCos2PiByN;
use num_traits::{AsPrimitive, Float};

#[inline(always)]
fn pm<T: Float>(c: T, d: T) -> (T, T) {
    (c + d, c - d)
}

// (a, b) = conj(c + id) * (e + if)
#[inline(always)]
fn mulpm<T: Float>(c: T, d: T, e: T, f: T) -> (T, T) {
    (c * e + d * f, c * f - d * e)
}

fn radf2<T: Float>(ido: usize, l1: usize, cc: &[T], ch: &mut [T], wa: &[T]) {
    const CDIM: usize = 2;
    let cc_i = |a: usize, b: usize, c: usize| a + ido * (b + l1 * c);
    let ch_i = |a: usize, b: usize, c: usize| a + ido * (b + CDIM * c);
    let wa_i = |x: usize, i: usize| i + x * (ido - 1);

    for k in 0..l1 {
        let (a, b) = pm(cc[cc_i(0, k, 0)], cc[cc_i(0, k, 1)]);
        ch[ch_i(0, 0, k)] = a;
        ch[ch_i(ido - 1, 1, k)] = b;
    }
    if (ido & 1) == 0 {
        for k in 0..l1 {
            ch[ch_i(0, 1, k)] = -cc[cc_i(ido - 1, k, 1)];
            ch[ch_i(ido - 1, 0, k)] = cc[cc_i(ido - 1, k, 0)];
        }
    }
    if ido <= 2 {
        return;
    }
    for k in 0..l1 {
        let mut i = 2;
        while i < ido {
            let ic = ido - i;
            let (tr2, ti2) = mulpm(
                wa[wa_i(0, i - 2)],
                wa[wa_i(0, i - 1)],
                cc[cc_i(i - 1, k, 1)],
                cc[cc_i(i, k, 1)],
            );
            let (a, b) = pm(cc[cc_i(i - 1, k, 0)], tr2);
            ch[ch_i(i - 1, 0, k)] = a;
            ch[ch_i(ic - 1, 1, k)] = b;
            let (a, b) = pm(ti2, cc[cc_i(i, k, 0)]);
            ch[ch_i(i, 0, k)] = a;
            ch[ch_i(ic, 1, k)] = b;
            i += 2;
        }
    }
}

fn radf3<T: Float + 'static>(ido: usize, l1: usize, cc: &[T], ch: &mut [T], wa: &[T])
where
    f64: AsPrimitive<T>,
{
    const CDIM: usize = 3;
    let taur: T = (-0.5f64).as_();
    let taui: T = 0.86602540378443864676f64.as_();
    let cc_i = |a: usize, b: usize, c: usize| a + ido * (b + l1 * c);
    let ch_i = |a: usize, b: usize, c: usize| a + ido * (b + CDIM * c);
    let wa_i = |x: usize, i: usize| i + x * (ido - 1);

    for k in 0..l1 {
        let cr2 = cc[cc_i(0, k, 1)] + cc[cc_i(0, k, 2)];
        ch[ch_i(0, 0, k)] = cc[cc_i(0, k, 0)] + cr2;
        ch[ch_i(0, 2, k)] = taui * (cc[cc_i(0, k, 2)] - cc[cc_i(0, k, 1)]);
        ch[ch_i(ido - 1, 1, k)] = cc[cc_i(0, k, 0)] + taur * cr2;
    }
    if ido == 1 {
        return;
    }
    for k in 0..l1 {
        let mut i = 2;
        while i < ido {
            let ic = ido - i;
            let (dr2, di2) = mulpm(
                wa[wa_i(0, i - 2)],
                wa[wa_i(0, i - 1)],
                cc[cc_i(i - 1, k, 1)],
                cc[cc_i(i, k, 1)],
            );
            let (dr3, di3) = mulpm(
                wa[wa_i(1, i - 2)],
                wa[wa_i(1, i - 1)],
                cc[cc_i(i - 1, k, 2)],
                cc[cc_i(i, k, 2)],
            );
            let cr2 = dr2 + dr3;
            let ci2 = di2 + di3;
            ch[ch_i(i - 1, 0, k)] = cc[cc_i(i - 1, k, 0)] + cr2;
            ch[ch_i(i, 0, k)] = cc[cc_i(i, k, 0)] + ci2;
            let tr2 = cc[cc_i(i - 1, k, 0)] + taur * cr2;
            let ti2 = cc[cc_i(i, k, 0)] + taur * ci2;
            let tr3 = taui * (di2 - di3);
            let ti3 = taui * (dr3 - dr2);
            let (a, b) = pm(tr2, tr3);
            ch[ch_i(i - 1, 2, k)] = a;
            ch[ch_i(ic - 1, 1, k)] = b;
            let (a, b) = pm(ti3, ti2);
            ch[ch_i(i, 2, k)] = a;
            ch[ch_i(ic, 1, k)] = b;
            i += 2;
        }
    }
}

fn radf4<T: Float + 'static>(ido: usize, l1: usize, cc: &[T], ch: &mut [T], wa: &[T])
where
    f64: AsPrimitive<T>,
{
    const CDIM: usize = 4;
    let hsqt2: T = 0.70710678118654752440f64.as_();
    let cc_i = |a: usize, b: usize, c: usize| a + ido * (b + l1 * c);
    let ch_i = |a: usize, b: usize, c: usize| a + ido * (b + CDIM * c);
    let wa_i = |x: usize, i: usize| i + x * (ido - 1);

    for k in 0..l1 {
        let (tr1, c2) = pm(cc[cc_i(0, k, 3)], cc[cc_i(0, k, 1)]);
        ch[ch_i(0, 2, k)] = c2;
        let (tr2, c1) = pm(cc[cc_i(0, k, 0)], cc[cc_i(0, k, 2)]);
        ch[ch_i(ido - 1, 1, k)] = c1;
        let (a, b) = pm(tr2, tr1);
        ch[ch_i(0, 0, k)] = a;
        ch[ch_i(ido - 1, 3, k)] = b;
    }
    if (ido & 1) == 0 {
        for k in 0..l1 {
            let ti1 = -hsqt2 * (cc[cc_i(ido - 1, k, 1)] + cc[cc_i(ido - 1, k, 3)]);
            let tr1 = hsqt2 * (cc[cc_i(ido - 1, k, 1)] - cc[cc_i(ido - 1, k, 3)]);
            let (a, b) = pm(cc[cc_i(ido - 1, k, 0)], tr1);
            ch[ch_i(ido - 1, 0, k)] = a;
            ch[ch_i(ido - 1, 2, k)] = b;
            let (a, b) = pm(ti1, cc[cc_i(ido - 1, k, 2)]);
            ch[ch_i(0, 3, k)] = a;
            ch[ch_i(0, 1, k)] = b;
        }
    }
    if ido <= 2 {
        return;
    }
    for k in 0..l1 {
        let mut i = 2;
        while i < ido {
            let ic = ido - i;
            let (cr2, ci2) = mulpm(
                wa[wa_i(0, i - 2)],
                wa[wa_i(0, i - 1)],
                cc[cc_i(i - 1, k, 1)],
                cc[cc_i(i, k, 1)],
            );
            let (cr3, ci3) = mulpm(
                wa[wa_i(1, i - 2)],
                wa[wa_i(1, i - 1)],
                cc[cc_i(i - 1, k, 2)],
                cc[cc_i(i, k, 2)],
            );
            let (cr4, ci4) = mulpm(
                wa[wa_i(2, i - 2)],
                wa[wa_i(2, i - 1)],
                cc[cc_i(i - 1, k, 3)],
                cc[cc_i(i, k, 3)],
            );
            let (tr1, tr4) = pm(cr4, cr2);
            let (ti1, ti4) = pm(ci2, ci4);
            let (tr2, tr3) = pm(cc[cc_i(i - 1, k, 0)], cr3);
            let (ti2, ti3) = pm(cc[cc_i(i, k, 0)], ci3);
            let (a, b) = pm(tr2, tr1);
            ch[ch_i(i - 1, 0, k)] = a;
            ch[ch_i(ic - 1, 3, k)] = b;
            let (a, b) = pm(ti1, ti2);
            ch[ch_i(i, 0, k)] = a;
            ch[ch_i(ic, 3, k)] = b;
            let (a, b) = pm(tr3, ti4);
            ch[ch_i(i - 1, 2, k)] = a;
            ch[ch_i(ic - 1, 1, k)] = b;
            let (a, b) = pm(tr4, ti3);
            ch[ch_i(i, 2, k)] = a;
            ch[ch_i(ic, 1, k)] = b;
            i += 2;
        }
    }
}

fn radf5<T: Float + 'static>(ido: usize, l1: usize, cc: &[T], ch: &mut [T], wa: &[T])
where
    f64: AsPrimitive<T>,
{
    const CDIM: usize = 5;
    let tr11: T = 0.3090169943749474241f64.as_();
    let ti11: T = 0.95105651629515357212f64.as_();
    let tr12: T = (-0.8090169943749474241f64).as_();
    let ti12: T = 0.58778525229247312917f64.as_();
    let cc_i = |a: usize, b: usize, c: usize| a + ido * (b + l1 * c);
    let ch_i = |a: usize, b: usize, c: usize| a + ido * (b + CDIM * c);
    let wa_i = |x: usize, i: usize| i + x * (ido - 1);

    for k in 0..l1 {
        let (cr2, ci5) = pm(cc[cc_i(0, k, 4)], cc[cc_i(0, k, 1)]);
        let (cr3, ci4) = pm(cc[cc_i(0, k, 3)], cc[cc_i(0, k, 2)]);
        ch[ch_i(0, 0, k)] = cc[cc_i(0, k, 0)] + cr2 + cr3;
        ch[ch_i(ido - 1, 1, k)] = cc[cc_i(0, k, 0)] + tr11 * cr2 + tr12 * cr3;
        ch[ch_i(0, 2, k)] = ti11 * ci5 + ti12 * ci4;
        ch[ch_i(ido - 1, 3, k)] = cc[cc_i(0, k, 0)] + tr12 * cr2 + tr11 * cr3;
        ch[ch_i(0, 4, k)] = ti12 * ci5 - ti11 * ci4;
    }
    if ido == 1 {
        return;
    }
    for k in 0..l1 {
        let mut i = 2;
        while i < ido {
            let ic = ido - i;
            let (dr2, di2) = mulpm(
                wa[wa_i(0, i - 2)],
                wa[wa_i(0, i - 1)],
                cc[cc_i(i - 1, k, 1)],
                cc[cc_i(i, k, 1)],
            );
            let (dr3, di3) = mulpm(
                wa[wa_i(1, i - 2)],
                wa[wa_i(1, i - 1)],
                cc[cc_i(i - 1, k, 2)],
                cc[cc_i(i, k, 2)],
            );
            let (dr4, di4) = mulpm(
                wa[wa_i(2, i - 2)],
                wa[wa_i(2, i - 1)],
                cc[cc_i(i - 1, k, 3)],
                cc[cc_i(i, k, 3)],
            );
            let (dr5, di5) = mulpm(
                wa[wa_i(3, i - 2)],
                wa[wa_i(3, i - 1)],
                cc[cc_i(i - 1, k, 4)],
                cc[cc_i(i, k, 4)],
            );
            let (cr2, ci5) = pm(dr5, dr2);
            let (ci2, cr5) = pm(di2, di5);
            let (cr3, ci4) = pm(dr4, dr3);
            let (ci3, cr4) = pm(di3, di4);
            ch[ch_i(i - 1, 0, k)] = cc[cc_i(i - 1, k, 0)] + cr2 + cr3;
            ch[ch_i(i, 0, k)] = cc[cc_i(i, k, 0)] + ci2 + ci3;
            let tr2 = cc[cc_i(i - 1, k, 0)] + tr11 * cr2 + tr12 * cr3;
            let ti2 = cc[cc_i(i, k, 0)] + tr11 * ci2 + tr12 * ci3;
            let tr3 = cc[cc_i(i - 1, k, 0)] + tr12 * cr2 + tr11 * cr3;
            let ti3 = cc[cc_i(i, k, 0)] + tr12 * ci2 + tr11 * ci3;
            let (tr5, tr4) = mulpm(cr5, cr4, ti11, ti12);
            let (ti5, ti4) = mulpm(ci5, ci4, ti11, ti12);
            let (a, b) = pm(tr2, tr5);
            ch[ch_i(i - 1, 2, k)] = a;
            ch[ch_i(ic - 1, 1, k)] = b;
            let (a, b) = pm(ti5, ti2);
            ch[ch_i(i, 2, k)] = a;
            ch[ch_i(ic, 1, k)] = b;
            let (a, b) = pm(tr3, tr4);
            ch[ch_i(i - 1, 4, k)] = a;
            ch[ch_i(ic - 1, 3, k)] = b;
            let (a, b) = pm(ti4, ti3);
            ch[ch_i(i, 4, k)] = a;
            ch[ch_i(ic, 3, k)] = b;
            i += 2;
        }
    }
}

// Generic forward radix. The final shuffle writes back into `cc`, so this
// stage does not swap the ping-pong buffers.
fn radfg<T: Float>(
    ido: usize,
    ip: usize,
    l1: usize,
    cc: &mut [T],
    ch: &mut [T],
    wa: &[T],
    csarr: &[T],
) {
    let cdim = ip;
    let ipph = (ip + 1) / 2;
    let idl1 = ido * l1;

    let c1 = |a: usize, b: usize, c: usize| a + ido * (b + l1 * c);
    let cc_o = |a: usize, b: usize, c: usize| a + ido * (b + cdim * c);
    let ch_o = |a: usize, b: usize, c: usize| a + ido * (b + l1 * c);

    if ido > 1 {
        let mut j = 1;
        let mut jc = ip - 1;
        while j < ipph {
            let is = (j - 1) * (ido - 1);
            let is2 = (jc - 1) * (ido - 1);
            for k in 0..l1 {
                let mut idij = is;
                let mut idij2 = is2;
                let mut i = 1;
                while i <= ido - 2 {
                    let t1 = cc[c1(i, k, j)];
                    let t2 = cc[c1(i + 1, k, j)];
                    let t3 = cc[c1(i, k, jc)];
                    let t4 = cc[c1(i + 1, k, jc)];
                    let x1 = wa[idij] * t1 + wa[idij + 1] * t2;
                    let x2 = wa[idij] * t2 - wa[idij + 1] * t1;
                    let x3 = wa[idij2] * t3 + wa[idij2 + 1] * t4;
                    let x4 = wa[idij2] * t4 - wa[idij2 + 1] * t3;
                    cc[c1(i, k, j)] = x1 + x3;
                    cc[c1(i, k, jc)] = x2 - x4;
                    cc[c1(i + 1, k, j)] = x2 + x4;
                    cc[c1(i + 1, k, jc)] = x3 - x1;
                    idij += 2;
                    idij2 += 2;
                    i += 2;
                }
            }
            j += 1;
            jc -= 1;
        }
    }

    {
        let mut j = 1;
        let mut jc = ip - 1;
        while j < ipph {
            for k in 0..l1 {
                let t1 = cc[c1(0, k, j)];
                let t2 = cc[c1(0, k, jc)];
                cc[c1(0, k, j)] = t1 + t2;
                cc[c1(0, k, jc)] = t2 - t1;
            }
            j += 1;
            jc -= 1;
        }
    }

    {
        let mut l = 1;
        let mut lc = ip - 1;
        while l < ipph {
            for ik in 0..idl1 {
                ch[ik + idl1 * l] = cc[ik]
                    + csarr[2 * l] * cc[ik + idl1]
                    + csarr[4 * l] * cc[ik + idl1 * 2];
                ch[ik + idl1 * lc] = csarr[2 * l + 1] * cc[ik + idl1 * (ip - 1)]
                    + csarr[4 * l + 1] * cc[ik + idl1 * (ip - 2)];
            }
            let mut iang = 2 * l;
            let mut j = 3;
            let mut jc = ip - 3;
            while j + 3 < ipph {
                iang += l;
                if iang >= ip {
                    iang -= ip;
                }
                let ar1 = csarr[2 * iang];
                let ai1 = csarr[2 * iang + 1];
                iang += l;
                if iang >= ip {
                    iang -= ip;
                }
                let ar2 = csarr[2 * iang];
                let ai2 = csarr[2 * iang + 1];
                iang += l;
                if iang >= ip {
                    iang -= ip;
                }
                let ar3 = csarr[2 * iang];
                let ai3 = csarr[2 * iang + 1];
                iang += l;
                if iang >= ip {
                    iang -= ip;
                }
                let ar4 = csarr[2 * iang];
                let ai4 = csarr[2 * iang + 1];
                for ik in 0..idl1 {
                    ch[ik + idl1 * l] = ch[ik + idl1 * l]
                        + ar1 * cc[ik + idl1 * j]
                        + ar2 * cc[ik + idl1 * (j + 1)]
                        + ar3 * cc[ik + idl1 * (j + 2)]
                        + ar4 * cc[ik + idl1 * (j + 3)];
                    ch[ik + idl1 * lc] = ch[ik + idl1 * lc]
                        + ai1 * cc[ik + idl1 * jc]
                        + ai2 * cc[ik + idl1 * (jc - 1)]
                        + ai3 * cc[ik + idl1 * (jc - 2)]
                        + ai4 * cc[ik + idl1 * (jc - 3)];
                }
                j += 4;
                jc -= 4;
            }
            while j + 1 < ipph {
                iang += l;
                if iang >= ip {
                    iang -= ip;
                }
                let ar1 = csarr[2 * iang];
                let ai1 = csarr[2 * iang + 1];
                iang += l;
                if iang >= ip {
                    iang -= ip;
                }
                let ar2 = csarr[2 * iang];
                let ai2 = csarr[2 * iang + 1];
                for ik in 0..idl1 {
                    ch[ik + idl1 * l] = ch[ik + idl1 * l]
                        + ar1 * cc[ik + idl1 * j]
                        + ar2 * cc[ik + idl1 * (j + 1)];
                    ch[ik + idl1 * lc] = ch[ik + idl1 * lc]
                        + ai1 * cc[ik + idl1 * jc]
                        + ai2 * cc[ik + idl1 * (jc - 1)];
                }
                j += 2;
                jc -= 2;
            }
            while j < ipph {
                iang += l;
                if iang >= ip {
                    iang -= ip;
                }
                let ar = csarr[2 * iang];
                let ai = csarr[2 * iang + 1];
                for ik in 0..idl1 {
                    ch[ik + idl1 * l] = ch[ik + idl1 * l] + ar * cc[ik + idl1 * j];
                    ch[ik + idl1 * lc] = ch[ik + idl1 * lc] + ai * cc[ik + idl1 * jc];
                }
                j += 1;
                jc -= 1;
            }
            l += 1;
            lc -= 1;
        }
    }

    for ik in 0..idl1 {
        ch[ik] = cc[ik];
    }
    for j in 1..ipph {
        for ik in 0..idl1 {
            ch[ik] = ch[ik] + cc[ik + idl1 * j];
        }
    }

    for k in 0..l1 {
        for i in 0..ido {
            cc[cc_o(i, 0, k)] = ch[ch_o(i, k, 0)];
        }
    }

    {
        let mut j = 1;
        let mut jc = ip - 1;
        while j < ipph {
            let j2 = 2 * j - 1;
            for k in 0..l1 {
                cc[cc_o(ido - 1, j2, k)] = ch[ch_o(0, k, j)];
                cc[cc_o(0, j2 + 1, k)] = ch[ch_o(0, k, jc)];
            }
            j += 1;
            jc -= 1;
        }
    }

    if ido == 1 {
        return;
    }

    {
        let mut j = 1;
        let mut jc = ip - 1;
        while j < ipph {
            let j2 = 2 * j - 1;
            for k in 0..l1 {
                let mut i = 1;
                let mut ic = ido - i - 2;
                while i <= ido - 2 {
                    cc[cc_o(i, j2 + 1, k)] = ch[ch_o(i, k, j)] + ch[ch_o(i, k, jc)];
                    cc[cc_o(ic, j2, k)] = ch[ch_o(i, k, j)] - ch[ch_o(i, k, jc)];
                    cc[cc_o(i + 1, j2 + 1, k)] = ch[ch_o(i + 1, k, j)] + ch[ch_o(i + 1, k, jc)];
                    cc[cc_o(ic + 1, j2, k)] = ch[ch_o(i + 1, k, jc)] - ch[ch_o(i + 1, k, j)];
                    i += 2;
                    ic = ic.wrapping_sub(2);
                }
            }
            j += 1;
            jc -= 1;
        }
    }
}

fn radb2<T: Float + 'static>(ido: usize, l1: usize, cc: &[T], ch: &mut [T], wa: &[T])
where
    f64: AsPrimitive<T>,
{
    const CDIM: usize = 2;
    let two: T = 2.0f64.as_();
    let cc_i = |a: usize, b: usize, c: usize| a + ido * (b + CDIM * c);
    let ch_i = |a: usize, b: usize, c: usize| a + ido * (b + l1 * c);
    let wa_i = |x: usize, i: usize| i + x * (ido - 1);

    for k in 0..l1 {
        let (a, b) = pm(cc[cc_i(0, 0, k)], cc[cc_i(ido - 1, 1, k)]);
        ch[ch_i(0, k, 0)] = a;
        ch[ch_i(0, k, 1)] = b;
    }
    if (ido & 1) == 0 {
        for k in 0..l1 {
            ch[ch_i(ido - 1, k, 0)] = two * cc[cc_i(ido - 1, 0, k)];
            ch[ch_i(ido - 1, k, 1)] = -two * cc[cc_i(0, 1, k)];
        }
    }
    if ido <= 2 {
        return;
    }
    for k in 0..l1 {
        let mut i = 2;
        while i < ido {
            let ic = ido - i;
            let (a, tr2) = pm(cc[cc_i(i - 1, 0, k)], cc[cc_i(ic - 1, 1, k)]);
            ch[ch_i(i - 1, k, 0)] = a;
            let (ti2, b) = pm(cc[cc_i(i, 0, k)], cc[cc_i(ic, 1, k)]);
            ch[ch_i(i, k, 0)] = b;
            let (im, re) = mulpm(wa[wa_i(0, i - 2)], wa[wa_i(0, i - 1)], ti2, tr2);
            ch[ch_i(i, k, 1)] = im;
            ch[ch_i(i - 1, k, 1)] = re;
            i += 2;
        }
    }
}

fn radb3<T: Float + 'static>(ido: usize, l1: usize, cc: &[T], ch: &mut [T], wa: &[T])
where
    f64: AsPrimitive<T>,
{
    const CDIM: usize = 3;
    let two: T = 2.0f64.as_();
    let taur: T = (-0.5f64).as_();
    let taui: T = 0.86602540378443864676f64.as_();
    let cc_i = |a: usize, b: usize, c: usize| a + ido * (b + CDIM * c);
    let ch_i = |a: usize, b: usize, c: usize| a + ido * (b + l1 * c);
    let wa_i = |x: usize, i: usize| i + x * (ido - 1);

    for k in 0..l1 {
        let tr2 = two * cc[cc_i(ido - 1, 1, k)];
        let cr2 = cc[cc_i(0, 0, k)] + taur * tr2;
        ch[ch_i(0, k, 0)] = cc[cc_i(0, 0, k)] + tr2;
        let ci3 = two * taui * cc[cc_i(0, 2, k)];
        let (a, b) = pm(cr2, ci3);
        ch[ch_i(0, k, 2)] = a;
        ch[ch_i(0, k, 1)] = b;
    }
    if ido == 1 {
        return;
    }
    for k in 0..l1 {
        let mut i = 2;
        while i < ido {
            let ic = ido - i;
            let tr2 = cc[cc_i(i - 1, 2, k)] + cc[cc_i(ic - 1, 1, k)];
            let ti2 = cc[cc_i(i, 2, k)] - cc[cc_i(ic, 1, k)];
            let cr2 = cc[cc_i(i - 1, 0, k)] + taur * tr2;
            let ci2 = cc[cc_i(i, 0, k)] + taur * ti2;
            ch[ch_i(i - 1, k, 0)] = cc[cc_i(i - 1, 0, k)] + tr2;
            ch[ch_i(i, k, 0)] = cc[cc_i(i, 0, k)] + ti2;
            let cr3 = taui * (cc[cc_i(i - 1, 2, k)] - cc[cc_i(ic - 1, 1, k)]);
            let ci3 = taui * (cc[cc_i(i, 2, k)] + cc[cc_i(ic, 1, k)]);
            let (dr3, dr2) = pm(cr2, ci3);
            let (di2, di3) = pm(ci2, cr3);
            let (im, re) = mulpm(wa[wa_i(0, i - 2)], wa[wa_i(0, i - 1)], di2, dr2);
            ch[ch_i(i, k, 1)] = im;
            ch[ch_i(i - 1, k, 1)] = re;
            let (im, re) = mulpm(wa[wa_i(1, i - 2)], wa[wa_i(1, i - 1)], di3, dr3);
            ch[ch_i(i, k, 2)] = im;
            ch[ch_i(i - 1, k, 2)] = re;
            i += 2;
        }
    }
}

fn radb4<T: Float + 'static>(ido: usize, l1: usize, cc: &[T], ch: &mut [T], wa: &[T])
where
    f64: AsPrimitive<T>,
{
    const CDIM: usize = 4;
    let two: T = 2.0f64.as_();
    let sqrt2: T = 1.41421356237309504880f64.as_();
    let cc_i = |a: usize, b: usize, c: usize| a + ido * (b + CDIM * c);
    let ch_i = |a: usize, b: usize, c: usize| a + ido * (b + l1 * c);
    let wa_i = |x: usize, i: usize| i + x * (ido - 1);

    for k in 0..l1 {
        let (tr2, tr1) = pm(cc[cc_i(0, 0, k)], cc[cc_i(ido - 1, 3, k)]);
        let tr3 = two * cc[cc_i(ido - 1, 1, k)];
        let tr4 = two * cc[cc_i(0, 2, k)];
        let (a, b) = pm(tr2, tr3);
        ch[ch_i(0, k, 0)] = a;
        ch[ch_i(0, k, 2)] = b;
        let (a, b) = pm(tr1, tr4);
        ch[ch_i(0, k, 3)] = a;
        ch[ch_i(0, k, 1)] = b;
    }
    if (ido & 1) == 0 {
        for k in 0..l1 {
            let (ti1, ti2) = pm(cc[cc_i(0, 3, k)], cc[cc_i(0, 1, k)]);
            let (tr2, tr1) = pm(cc[cc_i(ido - 1, 0, k)], cc[cc_i(ido - 1, 2, k)]);
            ch[ch_i(ido - 1, k, 0)] = tr2 + tr2;
            ch[ch_i(ido - 1, k, 1)] = sqrt2 * (tr1 - ti1);
            ch[ch_i(ido - 1, k, 2)] = ti2 + ti2;
            ch[ch_i(ido - 1, k, 3)] = -sqrt2 * (tr1 + ti1);
        }
    }
    if ido <= 2 {
        return;
    }
    for k in 0..l1 {
        let mut i = 2;
        while i < ido {
            let ic = ido - i;
            let (tr2, tr1) = pm(cc[cc_i(i - 1, 0, k)], cc[cc_i(ic - 1, 3, k)]);
            let (ti1, ti2) = pm(cc[cc_i(i, 0, k)], cc[cc_i(ic, 3, k)]);
            let (tr4, ti3) = pm(cc[cc_i(i, 2, k)], cc[cc_i(ic, 1, k)]);
            let (tr3, ti4) = pm(cc[cc_i(i - 1, 2, k)], cc[cc_i(ic - 1, 1, k)]);
            let (a, cr3) = pm(tr2, tr3);
            ch[ch_i(i - 1, k, 0)] = a;
            let (b, ci3) = pm(ti2, ti3);
            ch[ch_i(i, k, 0)] = b;
            let (cr4, cr2) = pm(tr1, tr4);
            let (ci2, ci4) = pm(ti1, ti4);
            let (im, re) = mulpm(wa[wa_i(0, i - 2)], wa[wa_i(0, i - 1)], ci2, cr2);
            ch[ch_i(i, k, 1)] = im;
            ch[ch_i(i - 1, k, 1)] = re;
            let (im, re) = mulpm(wa[wa_i(1, i - 2)], wa[wa_i(1, i - 1)], ci3, cr3);
            ch[ch_i(i, k, 2)] = im;
            ch[ch_i(i - 1, k, 2)] = re;
            let (im, re) = mulpm(wa[wa_i(2, i - 2)], wa[wa_i(2, i - 1)], ci4, cr4);
            ch[ch_i(i, k, 3)] = im;
            ch[ch_i(i - 1, k, 3)] = re;
            i += 2;
        }
    }
}

fn radb5<T: Float + 'static>(ido: usize, l1: usize, cc: &[T], ch: &mut [T], wa: &[T])
where
    f64: AsPrimitive<T>,
{
    const CDIM: usize = 5;
    let tr11: T = 0.3090169943749474241f64.as_();
    let ti11: T = 0.95105651629515357212f64.as_();
    let tr12: T = (-0.8090169943749474241f64).as_();
    let ti12: T = 0.58778525229247312917f64.as_();
    let cc_i = |a: usize, b: usize, c: usize| a + ido * (b + CDIM * c);
    let ch_i = |a: usize, b: usize, c: usize| a + ido * (b + l1 * c);
    let wa_i = |x: usize, i: usize| i + x * (ido - 1);

    for k in 0..l1 {
        let ti5 = cc[cc_i(0, 2, k)] + cc[cc_i(0, 2, k)];
        let ti4 = cc[cc_i(0, 4, k)] + cc[cc_i(0, 4, k)];
        let tr2 = cc[cc_i(ido - 1, 1, k)] + cc[cc_i(ido - 1, 1, k)];
        let tr3 = cc[cc_i(ido - 1, 3, k)] + cc[cc_i(ido - 1, 3, k)];
        ch[ch_i(0, k, 0)] = cc[cc_i(0, 0, k)] + tr2 + tr3;
        let cr2 = cc[cc_i(0, 0, k)] + tr11 * tr2 + tr12 * tr3;
        let cr3 = cc[cc_i(0, 0, k)] + tr12 * tr2 + tr11 * tr3;
        let (ci5, ci4) = mulpm(ti5, ti4, ti11, ti12);
        let (a, b) = pm(cr2, ci5);
        ch[ch_i(0, k, 4)] = a;
        ch[ch_i(0, k, 1)] = b;
        let (a, b) = pm(cr3, ci4);
        ch[ch_i(0, k, 3)] = a;
        ch[ch_i(0, k, 2)] = b;
    }
    if ido == 1 {
        return;
    }
    for k in 0..l1 {
        let mut i = 2;
        while i < ido {
            let ic = ido - i;
            let (tr2, tr5) = pm(cc[cc_i(i - 1, 2, k)], cc[cc_i(ic - 1, 1, k)]);
            let (ti5, ti2) = pm(cc[cc_i(i, 2, k)], cc[cc_i(ic, 1, k)]);
            let (tr3, tr4) = pm(cc[cc_i(i - 1, 4, k)], cc[cc_i(ic - 1, 3, k)]);
            let (ti4, ti3) = pm(cc[cc_i(i, 4, k)], cc[cc_i(ic, 3, k)]);
            ch[ch_i(i - 1, k, 0)] = cc[cc_i(i - 1, 0, k)] + tr2 + tr3;
            ch[ch_i(i, k, 0)] = cc[cc_i(i, 0, k)] + ti2 + ti3;
            let cr2 = cc[cc_i(i - 1, 0, k)] + tr11 * tr2 + tr12 * tr3;
            let ci2 = cc[cc_i(i, 0, k)] + tr11 * ti2 + tr12 * ti3;
            let cr3 = cc[cc_i(i - 1, 0, k)] + tr12 * tr2 + tr11 * tr3;
            let ci3 = cc[cc_i(i, 0, k)] + tr12 * ti2 + tr11 * ti3;
            let (cr5, cr4) = mulpm(tr5, tr4, ti11, ti12);
            let (ci5, ci4) = mulpm(ti5, ti4, ti11, ti12);
            let (dr4, dr3) = pm(cr3, ci4);
            let (di3, di4) = pm(ci3, cr4);
            let (dr5, dr2) = pm(cr2, ci5);
            let (di2, di5) = pm(ci2, cr5);
            let (im, re) = mulpm(wa[wa_i(0, i - 2)], wa[wa_i(0, i - 1)], di2, dr2);
            ch[ch_i(i, k, 1)] = im;
            ch[ch_i(i - 1, k, 1)] = re;
            let (im, re) = mulpm(wa[wa_i(1, i - 2)], wa[wa_i(1, i - 1)], di3, dr3);
            ch[ch_i(i, k, 2)] = im;
            ch[ch_i(i - 1, k, 2)] = re;
            let (im, re) = mulpm(wa[wa_i(2, i - 2)], wa[wa_i(2, i - 1)], di4, dr4);
            ch[ch_i(i, k, 3)] = im;
            ch[ch_i(i - 1, k, 3)] = re;
            let (im, re) = mulpm(wa[wa_i(3, i - 2)], wa[wa_i(3, i - 1)], di5, dr5);
            ch[ch_i(i, k, 4)] = im;
            ch[ch_i(i - 1, k, 4)] = re;
            i += 2;
        }
    }
}

fn radbg<T: Float + 'static>(
    ido: usize,
    ip: usize,
    l1: usize,
    cc: &mut [T],
    ch: &mut [T],
    wa: &[T],
    csarr: &[T],
) where
    f64: AsPrimitive<T>,
{
    let cdim = ip;
    let ipph = (ip + 1) / 2;
    let idl1 = ido * l1;
    let two: T = 2.0f64.as_();

    let cc_o = |a: usize, b: usize, c: usize| a + ido * (b + cdim * c);
    let ch_o = |a: usize, b: usize, c: usize| a + ido * (b + l1 * c);
    let c1 = |a: usize, b: usize, c: usize| a + ido * (b + l1 * c);

    for k in 0..l1 {
        for i in 0..ido {
            ch[ch_o(i, k, 0)] = cc[cc_o(i, 0, k)];
        }
    }
    {
        let mut j = 1;
        let mut jc = ip - 1;
        while j < ipph {
            let j2 = 2 * j - 1;
            for k in 0..l1 {
                ch[ch_o(0, k, j)] = two * cc[cc_o(ido - 1, j2, k)];
                ch[ch_o(0, k, jc)] = two * cc[cc_o(0, j2 + 1, k)];
            }
            j += 1;
            jc -= 1;
        }
    }

    if ido != 1 {
        let mut j = 1;
        let mut jc = ip - 1;
        while j < ipph {
            let j2 = 2 * j - 1;
            for k in 0..l1 {
                let mut i = 1;
                let mut ic = ido - i - 2;
                while i <= ido - 2 {
                    ch[ch_o(i, k, j)] = cc[cc_o(i, j2 + 1, k)] + cc[cc_o(ic, j2, k)];
                    ch[ch_o(i, k, jc)] = cc[cc_o(i, j2 + 1, k)] - cc[cc_o(ic, j2, k)];
                    ch[ch_o(i + 1, k, j)] = cc[cc_o(i + 1, j2 + 1, k)] - cc[cc_o(ic + 1, j2, k)];
                    ch[ch_o(i + 1, k, jc)] = cc[cc_o(i + 1, j2 + 1, k)] + cc[cc_o(ic + 1, j2, k)];
                    i += 2;
                    ic = ic.wrapping_sub(2);
                }
            }
            j += 1;
            jc -= 1;
        }
    }

    {
        let mut l = 1;
        let mut lc = ip - 1;
        while l < ipph {
            for ik in 0..idl1 {
                cc[ik + idl1 * l] = ch[ik]
                    + csarr[2 * l] * ch[ik + idl1]
                    + csarr[4 * l] * ch[ik + idl1 * 2];
                cc[ik + idl1 * lc] = csarr[2 * l + 1] * ch[ik + idl1 * (ip - 1)]
                    + csarr[4 * l + 1] * ch[ik + idl1 * (ip - 2)];
            }
            let mut iang = 2 * l;
            let mut j = 3;
            let mut jc = ip - 3;
            while j + 3 < ipph {
                iang += l;
                if iang > ip {
                    iang -= ip;
                }
                let ar1 = csarr[2 * iang];
                let ai1 = csarr[2 * iang + 1];
                iang += l;
                if iang > ip {
                    iang -= ip;
                }
                let ar2 = csarr[2 * iang];
                let ai2 = csarr[2 * iang + 1];
                iang += l;
                if iang > ip {
                    iang -= ip;
                }
                let ar3 = csarr[2 * iang];
                let ai3 = csarr[2 * iang + 1];
                iang += l;
                if iang > ip {
                    iang -= ip;
                }
                let ar4 = csarr[2 * iang];
                let ai4 = csarr[2 * iang + 1];
                for ik in 0..idl1 {
                    cc[ik + idl1 * l] = cc[ik + idl1 * l]
                        + ar1 * ch[ik + idl1 * j]
                        + ar2 * ch[ik + idl1 * (j + 1)]
                        + ar3 * ch[ik + idl1 * (j + 2)]
                        + ar4 * ch[ik + idl1 * (j + 3)];
                    cc[ik + idl1 * lc] = cc[ik + idl1 * lc]
                        + ai1 * ch[ik + idl1 * jc]
                        + ai2 * ch[ik + idl1 * (jc - 1)]
                        + ai3 * ch[ik + idl1 * (jc - 2)]
                        + ai4 * ch[ik + idl1 * (jc - 3)];
                }
                j += 4;
                jc -= 4;
            }
            while j + 1 < ipph {
                iang += l;
                if iang > ip {
                    iang -= ip;
                }
                let ar1 = csarr[2 * iang];
                let ai1 = csarr[2 * iang + 1];
                iang += l;
                if iang > ip {
                    iang -= ip;
                }
                let ar2 = csarr[2 * iang];
                let ai2 = csarr[2 * iang + 1];
                for ik in 0..idl1 {
                    cc[ik + idl1 * l] = cc[ik + idl1 * l]
                        + ar1 * ch[ik + idl1 * j]
                        + ar2 * ch[ik + idl1 * (j + 1)];
                    cc[ik + idl1 * lc] = cc[ik + idl1 * lc]
                        + ai1 * ch[ik + idl1 * jc]
                        + ai2 * ch[ik + idl1 * (jc - 1)];
                }
                j += 2;
                jc -= 2;
            }
            while j < ipph {
                iang += l;
                if iang > ip {
                    iang -= ip;
                }
                let war = csarr[2 * iang];
                let wai = csarr[2 * iang + 1];
                for ik in 0..idl1 {
                    cc[ik + idl1 * l] = cc[ik + idl1 * l] + war * ch[ik + idl1 * j];
                    cc[ik + idl1 * lc] = cc[ik + idl1 * lc] + wai * ch[ik + idl1 * jc];
                }
                j += 1;
                jc -= 1;
            }
            l += 1;
            lc -= 1;
        }
    }

    for j in 1..ipph {
        for ik in 0..idl1 {
            ch[ik] = ch[ik] + ch[ik + idl1 * j];
        }
    }
    {
        let mut j = 1;
        let mut jc = ip - 1;
        while j < ipph {
            for k in 0..l1 {
                let t1 = cc[c1(0, k, j)];
                let t2 = cc[c1(0, k, jc)];
                ch[ch_o(0, k, j)] = t1 - t2;
                ch[ch_o(0, k, jc)] = t1 + t2;
            }
            j += 1;
            jc -= 1;
        }
    }

    if ido == 1 {
        return;
    }

    {
        let mut j = 1;
        let mut jc = ip - 1;
        while j < ipph {
            for k in 0..l1 {
                let mut i = 1;
                while i <= ido - 2 {
                    ch[ch_o(i, k, j)] = cc[c1(i, k, j)] - cc[c1(i + 1, k, jc)];
                    ch[ch_o(i, k, jc)] = cc[c1(i, k, j)] + cc[c1(i + 1, k, jc)];
                    ch[ch_o(i + 1, k, j)] = cc[c1(i + 1, k, j)] + cc[c1(i, k, jc)];
                    ch[ch_o(i + 1, k, jc)] = cc[c1(i + 1, k, j)] - cc[c1(i, k, jc)];
                    i += 2;
                }
            }
            j += 1;
            jc -= 1;
        }
    }

    for j in 1..ip {
        let is = (j - 1) * (ido - 1);
        for k in 0..l1 {
            let mut idij = is;
            let mut i = 1;
            while i <= ido - 2 {
                let t1 = ch[ch_o(i, k, j)];
                let t2 = ch[ch_o(i + 1, k, j)];
                ch[ch_o(i, k, j)] = wa[idij] * t1 - wa[idij + 1] * t2;
                ch[ch_o(i + 1, k, j)] = wa[idij] * t2 + wa[idij + 1] * t1;
                idij += 2;
                i += 2;
            }
        }
    }
}

/// Mixed-radix plan for real-valued data of a fixed length.
///
/// A forward transform produces the packed spectrum: `X[0].re` first, then
/// `(X[k].re, X[k].im)` pairs, and `X[n/2].re` last when the length is even.
/// The backward transform consumes the same layout.
pub struct RfftPlan<T> {
    length: usize,
    fct: Vec<Factor>,
    mem: Vec<T>,
}

impl<T: Float + 'static> RfftPlan<T>
where
    f64: AsPrimitive<T>,
{
    pub fn new(length: usize) -> Result<RfftPlan<T>, PackFftError> {
        if length == 0 {
            return Err(PackFftError::ZeroSizedFft);
        }
        if length == 1 {
            return Ok(RfftPlan {
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
                if ip > 5 {
                    twsize += 2 * ip;
                }
                l1 *= ip;
            }
        }
        let mut mem = try_vec![T::zero(); twsize];

        let twid = SinCos2PiByN::new(length, true)?;
        let nfct = fct.len();
        let mut l1 = 1usize;
        let mut memofs = 0usize;
        for (k, f) in fct.iter_mut().enumerate() {
            let ip = f.fct;
            let ido = length / (l1 * ip);
            if k < nfct - 1 {
                // the last factor needs no twiddles
                f.tw = memofs;
                memofs += (ip - 1) * (ido - 1);
                for j in 1..ip {
                    for i in 1..=(ido - 1) / 2 {
                        let (c, s) = twid.cs(j * l1 * i);
                        mem[f.tw + (j - 1) * (ido - 1) + 2 * i - 2] = c.as_();
                        mem[f.tw + (j - 1) * (ido - 1) + 2 * i - 1] = s.as_();
                    }
                }
            }
            if ip > 5 {
                // DFT-of-unity coefficients for the generic radix
                f.tws = memofs;
                memofs += 2 * ip;
                mem[f.tws] = T::one();
                mem[f.tws + 1] = T::zero();
                for i in 1..=(ip >> 1) {
                    let (c, s) = twid.cs(i * (length / ip));
                    mem[f.tws + 2 * i] = c.as_();
                    mem[f.tws + 2 * i + 1] = s.as_();
                    mem[f.tws + 2 * (ip - i)] = c.as_();
                    mem[f.tws + 2 * (ip - i) + 1] = (-s).as_();
                }
            }
            l1 *= ip;
        }

        Ok(RfftPlan { length, fct, mem })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub(crate) fn factors(&self) -> Vec<usize> {
        self.fct.iter().map(|f| f.fct).collect()
    }

    /// Real input to packed spectrum, factors processed from largest stride
    /// inward.
    pub fn forward(&self, c: &mut [T], fct: T) -> Result<(), PackFftError> {
        if c.len() != self.length {
            return Err(PackFftError::InvalidInPlaceLength(self.length, c.len()));
        }
        if self.length == 1 {
            c[0] = c[0] * fct;
            return Ok(());
        }
        let n = self.length;
        let nf = self.fct.len();
        let mut ch = try_vec![T::zero(); n];
        let mut l1 = n;
        let mut in_ch = false;
        for k1 in 0..nf {
            let k = nf - k1 - 1;
            let f = self.fct[k];
            let ip = f.fct;
            let ido = n / l1;
            l1 /= ip;
            let tw = &self.mem[f.tw..f.tw + (ip - 1) * (ido - 1)];
            let generic = !matches!(ip, 2 | 3 | 4 | 5);
            {
                let (p1, p2): (&mut [T], &mut [T]) = if in_ch {
                    (ch.as_mut_slice(), &mut *c)
                } else {
                    (&mut *c, ch.as_mut_slice())
                };
                match ip {
                    4 => radf4(ido, l1, p1, p2, tw),
                    2 => radf2(ido, l1, p1, p2, tw),
                    3 => radf3(ido, l1, p1, p2, tw),
                    5 => radf5(ido, l1, p1, p2, tw),
                    _ => {
                        let tws = &self.mem[f.tws..f.tws + 2 * ip];
                        radfg(ido, ip, l1, p1, p2, tw, tws);
                    }
                }
            }
            if !generic {
                in_ch = !in_ch;
            }
        }
        copy_and_norm(c, &ch, in_ch, fct);
        Ok(())
    }

    /// Packed spectrum back to real samples.
    pub fn backward(&self, c: &mut [T], fct: T) -> Result<(), PackFftError> {
        if c.len() != self.length {
            return Err(PackFftError::InvalidInPlaceLength(self.length, c.len()));
        }
        if self.length == 1 {
            c[0] = c[0] * fct;
            return Ok(());
        }
        let n = self.length;
        let mut ch = try_vec![T::zero(); n];
        let mut l1 = 1usize;
        let mut in_ch = false;
        for f in self.fct.iter() {
            let ip = f.fct;
            let ido = n / (ip * l1);
            let tw = &self.mem[f.tw..f.tw + (ip - 1) * (ido - 1)];
            {
                let (p1, p2): (&mut [T], &mut [T]) = if in_ch {
                    (ch.as_mut_slice(), &mut *c)
                } else {
                    (&mut *c, ch.as_mut_slice())
                };
                match ip {
                    4 => radb4(ido, l1, p1, p2, tw),
                    2 => radb2(ido, l1, p1, p2, tw),
                    3 => radb3(ido, l1, p1, p2, tw),
                    5 => radb5(ido, l1, p1, p2, tw),
                    _ => {
                        let tws = &self.mem[f.tws..f.tws + 2 * ip];
                        radbg(ido, ip, l1, p1, p2, tw, tws);
                    }
                }
            }
            in_ch = !in_ch;
            l1 *= ip;
        }
        copy_and_norm(c, &ch, in_ch, fct);
        Ok(())
    }
}

fn copy_and_norm<T: Float>(c: &mut [T], ch: &[T], in_ch: bool, fct: T) {
    if in_ch {
        if fct != T::one() {
            for (dst, src) in c.iter_mut().zip(ch.iter()) {
                *dst = *src * fct;
            }
        } else {
            c.copy_from_slice(ch);
        }
    } else if fct != T::one() {
        for v in c.iter_mut() {
            *v = *v * fct;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;
    use rand::Rng;

    fn reference_packed(input: &[f64]) -> Vec<f64> {
        let n = input.len();
        let mut out = vec![0.0f64; n];
        let spectrum: Vec<Complex<f64>> = (0..n)
            .map(|k| {
                let mut sum = Complex::new(0.0, 0.0);
                for (m, &x) in input.iter().enumerate() {
                    let ang = -2.0 * std::f64::consts::PI * (k * m % n) as f64 / n as f64;
                    sum += Complex::new(x * ang.cos(), x * ang.sin());
                }
                sum
            })
            .collect();
        out[0] = spectrum[0].re;
        for k in 1..n.div_ceil(2) {
            out[2 * k - 1] = spectrum[k].re;
            out[2 * k] = spectrum[k].im;
        }
        if n % 2 == 0 {
            out[n - 1] = spectrum[n / 2].re;
        }
        out
    }

    #[test]
    fn test_packed_spectrum_radix23() {
        let plan = RfftPlan::<f64>::new(6).unwrap();
        let mut data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        plan.forward(&mut data, 1.0).unwrap();
        let expected = [
            21.0,
            -3.0,
            5.196152422706632,
            -3.0,
            1.7320508075688772,
            -3.0,
        ];
        for (a, b) in data.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-13, "{data:?} vs {expected:?}");
        }
        plan.backward(&mut data, 1.0 / 6.0).unwrap();
        for (i, v) in data.iter().enumerate() {
            assert!((v - (i + 1) as f64).abs() < 1e-13, "{data:?}");
        }
    }

    #[test]
    fn test_matches_packed_reference() {
        let mut rng = rand::rng();
        // every small radix, the generic radix, and a generic stage with
        // ido > 1 (77 = 7 * 11)
        for n in [
            2usize, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 18, 20, 22, 25, 26, 49, 77,
        ] {
            let input: Vec<f64> = (0..n).map(|_| rng.random_range(-1.0..1.0)).collect();
            let expected = reference_packed(&input);
            let plan = RfftPlan::<f64>::new(n).unwrap();
            let mut data = input.clone();
            plan.forward(&mut data, 1.0).unwrap();
            for (idx, (a, b)) in data.iter().zip(expected.iter()).enumerate() {
                assert!(
                    (a - b).abs() < 1e-9,
                    "forward mismatch at {idx} for n={n}: {a} vs {b}"
                );
            }
        }
    }

    #[test]
    fn test_roundtrip_f64() {
        let mut rng = rand::rng();
        for n in 1..250usize {
            let src: Vec<f64> = (0..n).map(|_| rng.random_range(-1.0..1.0)).collect();
            let mut data = src.clone();
            let plan = RfftPlan::<f64>::new(n).unwrap();
            plan.forward(&mut data, 1.0).unwrap();
            plan.backward(&mut data, 1.0 / n as f64).unwrap();
            for (a, b) in data.iter().zip(src.iter()) {
                assert!(
                    (a - b).abs() < 1e-10,
                    "roundtrip failed for n={n}: {a} vs {b}"
                );
            }
        }
    }

    #[test]
    fn test_roundtrip_f32() {
        let mut rng = rand::rng();
        for n in 1..250usize {
            let src: Vec<f32> = (0..n).map(|_| rng.random_range(-1.0..1.0)).collect();
            let mut data = src.clone();
            let plan = RfftPlan::<f32>::new(n).unwrap();
            plan.forward(&mut data, 1.0).unwrap();
            plan.backward(&mut data, 1.0 / n as f32).unwrap();
            for (a, b) in data.iter().zip(src.iter()) {
                assert!(
                    (a - b).abs() < 1e-3,
                    "roundtrip failed for n={n}: {a} vs {b}"
                );
            }
        }
    }

    #[test]
    fn test_factorization_product() {
        for n in 2..400usize {
            let plan = RfftPlan::<f64>::new(n).unwrap();
            assert_eq!(plan.factors().iter().product::<usize>(), n);
        }
    }

    #[test]
    fn test_zero_length_rejected() {
        assert!(matches!(
            RfftPlan::<f64>::new(0),
            Err(PackFftError::ZeroSizedFft)
        ));
    }
}

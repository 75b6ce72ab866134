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
use crate::plan1d::{ComplexPlan, RealPlan};
use num_complex::Complex;
use num_traits::{AsPrimitive, Float, Zero};

#[derive(Clone, Copy)]
struct DimInfo {
    n: usize,
    s: i64,
}

/// Walks every coordinate of an N-D array with one axis removed, yielding the
/// element offset of each 1-D fiber start. Input and output iterators over
/// the same shape advance in lock-step and finish together.
struct MultiIter {
    dim: Vec<DimInfo>,
    pos: Vec<usize>,
    ofs: i64,
    len: usize,
    str: i64,
    rem: i64,
    done: bool,
}

impl MultiIter {
    fn new(shape: &[usize], strides: &[i64], axis: usize) -> MultiIter {
        let mut dim = Vec::with_capacity(shape.len().saturating_sub(1));
        let mut done = false;
        let mut rem = 1i64;
        for i in 0..shape.len() {
            if i != axis {
                dim.push(DimInfo {
                    n: shape[i],
                    s: strides[i],
                });
                done = done || shape[i] == 0;
                rem *= shape[i] as i64;
            }
        }
        let ndim = dim.len();
        MultiIter {
            dim,
            pos: vec![0; ndim],
            ofs: 0,
            len: shape[axis],
            str: strides[axis],
            rem,
            done,
        }
    }

    fn advance(&mut self) {
        self.rem -= 1;
        if self.rem <= 0 {
            self.done = true;
            return;
        }
        for i in (0..self.pos.len()).rev() {
            self.pos[i] += 1;
            self.ofs += self.dim[i].s;
            if self.pos[i] < self.dim[i].n {
                return;
            }
            self.pos[i] = 0;
            self.ofs -= self.dim[i].n as i64 * self.dim[i].s;
        }
        self.done = true;
    }

    fn done(&self) -> bool {
        self.done
    }

    fn offset(&self) -> i64 {
        self.ofs
    }

    fn length(&self) -> usize {
        self.len
    }

    fn stride(&self) -> i64 {
        self.str
    }
}

fn validate_axes(ndim: usize, axes: &[usize]) -> Result<(), PackFftError> {
    if axes.len() > ndim {
        return Err(PackFftError::ShapeMismatch(axes.len(), ndim));
    }
    for &a in axes {
        if a >= ndim {
            return Err(PackFftError::AxisOutOfRange(a, ndim));
        }
    }
    Ok(())
}

// Rejects shape/stride combinations that can reach outside a buffer of
// `len` elements starting at offset zero. The raw C entry points skip this
// and trust the caller, as negative strides are only meaningful there.
fn check_layout(shape: &[usize], strides: &[i64], len: usize) -> Result<(), PackFftError> {
    if strides.len() != shape.len() {
        return Err(PackFftError::ShapeMismatch(strides.len(), shape.len()));
    }
    if shape.iter().any(|&n| n == 0) {
        return Ok(());
    }
    let mut lo = 0i64;
    let mut hi = 0i64;
    for (&n, &s) in shape.iter().zip(strides.iter()) {
        let span = (n as i64 - 1) * s;
        if span < 0 {
            lo += span;
        } else {
            hi += span;
        }
    }
    if lo < 0 || hi >= len as i64 {
        return Err(PackFftError::StridesOutOfBounds);
    }
    Ok(())
}

pub(crate) unsafe fn general_c2c_raw<T: Float + 'static>(
    shape: &[usize],
    stride_in: &[i64],
    stride_out: &[i64],
    axes: &[usize],
    forward: bool,
    data_in: *const Complex<T>,
    data_out: *mut Complex<T>,
    fct: T,
) -> Result<(), PackFftError>
where
    f64: AsPrimitive<T>,
{
    validate_axes(shape.len(), axes)?;
    let tmpsize = axes.iter().map(|&a| shape[a]).max().unwrap_or(0);
    let mut tdata = try_vec![Complex::<T>::zero(); tmpsize];
    let mut plan: Option<ComplexPlan<T>> = None;
    let mut src = data_in;
    let mut strides_src = stride_in;
    let mut fct = fct;

    for &axis in axes {
        let mut it_in = MultiIter::new(shape, strides_src, axis);
        let mut it_out = MultiIter::new(shape, stride_out, axis);
        let len = it_in.length();
        if plan.as_ref().map(|p| p.length()) != Some(len) {
            plan = Some(ComplexPlan::new(len)?);
        }
        let plan = plan.as_ref().unwrap();
        let s_i = it_in.stride();
        let s_o = it_out.stride();
        while !it_in.done() {
            let d_i = src.offset(it_in.offset() as isize);
            let d_o = data_out.offset(it_out.offset() as isize);
            for (i, t) in tdata[..len].iter_mut().enumerate() {
                *t = *d_i.offset((i as i64 * s_i) as isize);
            }
            if forward {
                plan.forward(&mut tdata[..len], fct)?;
            } else {
                plan.backward(&mut tdata[..len], fct)?;
            }
            for (i, t) in tdata[..len].iter().enumerate() {
                *d_o.offset((i as i64 * s_o) as isize) = *t;
            }
            it_in.advance();
            it_out.advance();
        }
        // after the first axis the output array is the data source, and the
        // normalization has already been applied
        src = data_out as *const Complex<T>;
        strides_src = stride_out;
        fct = T::one();
    }
    Ok(())
}

pub(crate) unsafe fn general_hartley_raw<T: Float + 'static>(
    shape: &[usize],
    stride_in: &[i64],
    stride_out: &[i64],
    axes: &[usize],
    data_in: *const T,
    data_out: *mut T,
    fct: T,
) -> Result<(), PackFftError>
where
    f64: AsPrimitive<T>,
{
    validate_axes(shape.len(), axes)?;
    let tmpsize = axes.iter().map(|&a| shape[a]).max().unwrap_or(0);
    let mut tdata = try_vec![T::zero(); tmpsize];
    let mut plan: Option<RealPlan<T>> = None;
    let mut src = data_in;
    let mut strides_src = stride_in;
    let mut fct = fct;

    for &axis in axes {
        let mut it_in = MultiIter::new(shape, strides_src, axis);
        let mut it_out = MultiIter::new(shape, stride_out, axis);
        let len = it_in.length();
        if plan.as_ref().map(|p| p.length()) != Some(len) {
            plan = Some(RealPlan::new(len)?);
        }
        let plan = plan.as_ref().unwrap();
        let s_i = it_in.stride();
        let s_o = it_out.stride();
        while !it_in.done() {
            let d_i = src.offset(it_in.offset() as isize);
            let d_o = data_out.offset(it_out.offset() as isize);
            for (i, t) in tdata[..len].iter_mut().enumerate() {
                *t = *d_i.offset((i as i64 * s_i) as isize);
            }
            plan.forward(&mut tdata[..len], fct)?;
            // unpack to Hartley order: X[k] = re + im, X[n-k] = re - im
            *d_o = tdata[0];
            let mut i = 1usize;
            let mut i1 = 1i64;
            let mut i2 = len as i64 - 1;
            while i + 1 < len {
                *d_o.offset((i1 * s_o) as isize) = tdata[i] + tdata[i + 1];
                *d_o.offset((i2 * s_o) as isize) = tdata[i] - tdata[i + 1];
                i += 2;
                i1 += 1;
                i2 -= 1;
            }
            if i < len {
                *d_o.offset((i1 * s_o) as isize) = tdata[i];
            }
            it_in.advance();
            it_out.advance();
        }
        src = data_out as *const T;
        strides_src = stride_out;
        fct = T::one();
    }
    Ok(())
}

pub(crate) unsafe fn general_r2c_raw<T: Float + 'static>(
    shape: &[usize],
    stride_in: &[i64],
    stride_out: &[i64],
    axis: usize,
    data_in: *const T,
    data_out: *mut Complex<T>,
    fct: T,
) -> Result<(), PackFftError>
where
    f64: AsPrimitive<T>,
{
    validate_axes(shape.len(), &[axis])?;
    let len = shape[axis];
    let plan = RealPlan::new(len)?;
    let mut tdata = try_vec![T::zero(); len];
    let mut it_in = MultiIter::new(shape, stride_in, axis);
    let mut it_out = MultiIter::new(shape, stride_out, axis);
    let s_i = it_in.stride();
    let s_o = it_out.stride();
    while !it_in.done() {
        let d_i = data_in.offset(it_in.offset() as isize);
        let d_o = data_out.offset(it_out.offset() as isize);
        for (i, t) in tdata.iter_mut().enumerate() {
            *t = *d_i.offset((i as i64 * s_i) as isize);
        }
        plan.forward(&mut tdata, fct)?;
        *d_o = Complex {
            re: tdata[0],
            im: T::zero(),
        };
        let mut i = 1usize;
        while i + 1 < len {
            let io = ((i + 1) / 2) as i64;
            *d_o.offset((io * s_o) as isize) = Complex {
                re: tdata[i],
                im: tdata[i + 1],
            };
            i += 2;
        }
        if i < len {
            let io = ((i + 1) / 2) as i64;
            *d_o.offset((io * s_o) as isize) = Complex {
                re: tdata[i],
                im: T::zero(),
            };
        }
        it_in.advance();
        it_out.advance();
    }
    Ok(())
}

pub(crate) unsafe fn general_c2r_raw<T: Float + 'static>(
    shape_out: &[usize],
    stride_in: &[i64],
    stride_out: &[i64],
    axis: usize,
    data_in: *const Complex<T>,
    data_out: *mut T,
    fct: T,
) -> Result<(), PackFftError>
where
    f64: AsPrimitive<T>,
{
    validate_axes(shape_out.len(), &[axis])?;
    let len = shape_out[axis];
    let plan = RealPlan::new(len)?;
    let mut tdata = try_vec![T::zero(); len];
    let mut it_in = MultiIter::new(shape_out, stride_in, axis);
    let mut it_out = MultiIter::new(shape_out, stride_out, axis);
    let s_i = it_in.stride();
    let s_o = it_out.stride();
    while !it_in.done() {
        let d_i = data_in.offset(it_in.offset() as isize);
        let d_o = data_out.offset(it_out.offset() as isize);
        tdata[0] = (*d_i).re;
        let mut i = 1usize;
        while i + 1 < len {
            let ii = ((i + 1) / 2) as i64;
            let v = *d_i.offset((ii * s_i) as isize);
            tdata[i] = v.re;
            tdata[i + 1] = v.im;
            i += 2;
        }
        if i < len {
            let ii = ((i + 1) / 2) as i64;
            tdata[i] = (*d_i.offset((ii * s_i) as isize)).re;
        }
        plan.backward(&mut tdata, fct)?;
        for (i, t) in tdata.iter().enumerate() {
            *d_o.offset((i as i64 * s_o) as isize) = *t;
        }
        it_in.advance();
        it_out.advance();
    }
    Ok(())
}

/// Complex transform over `axes`, in the order given. Strides are signed and
/// expressed in complex elements; `data_out` is also the working array for
/// every axis after the first.
#[allow(clippy::too_many_arguments)]
pub fn c2c<T: Float + 'static>(
    shape: &[usize],
    stride_in: &[i64],
    stride_out: &[i64],
    axes: &[usize],
    forward: bool,
    data_in: &[Complex<T>],
    data_out: &mut [Complex<T>],
    fct: T,
) -> Result<(), PackFftError>
where
    f64: AsPrimitive<T>,
{
    check_layout(shape, stride_in, data_in.len())?;
    check_layout(shape, stride_out, data_out.len())?;
    unsafe {
        general_c2c_raw(
            shape,
            stride_in,
            stride_out,
            axes,
            forward,
            data_in.as_ptr(),
            data_out.as_mut_ptr(),
            fct,
        )
    }
}

/// Discrete Hartley transform over `axes`; real data, self-inverse up to
/// scaling. Strides are in real elements.
#[allow(clippy::too_many_arguments)]
pub fn hartley<T: Float + 'static>(
    shape: &[usize],
    stride_in: &[i64],
    stride_out: &[i64],
    axes: &[usize],
    data_in: &[T],
    data_out: &mut [T],
    fct: T,
) -> Result<(), PackFftError>
where
    f64: AsPrimitive<T>,
{
    check_layout(shape, stride_in, data_in.len())?;
    check_layout(shape, stride_out, data_out.len())?;
    unsafe {
        general_hartley_raw(
            shape,
            stride_in,
            stride_out,
            axes,
            data_in.as_ptr(),
            data_out.as_mut_ptr(),
            fct,
        )
    }
}

/// Real-to-complex transform along one axis. The output holds
/// `shape[axis]/2 + 1` complex elements along that axis.
#[allow(clippy::too_many_arguments)]
pub fn r2c<T: Float + 'static>(
    shape: &[usize],
    stride_in: &[i64],
    stride_out: &[i64],
    axis: usize,
    data_in: &[T],
    data_out: &mut [Complex<T>],
    fct: T,
) -> Result<(), PackFftError>
where
    f64: AsPrimitive<T>,
{
    validate_axes(shape.len(), &[axis])?;
    check_layout(shape, stride_in, data_in.len())?;
    let mut out_shape = try_vec![0usize; shape.len()];
    out_shape.copy_from_slice(shape);
    out_shape[axis] = shape[axis] / 2 + 1;
    check_layout(&out_shape, stride_out, data_out.len())?;
    unsafe {
        general_r2c_raw(
            shape,
            stride_in,
            stride_out,
            axis,
            data_in.as_ptr(),
            data_out.as_mut_ptr(),
            fct,
        )
    }
}

/// Complex-to-real transform along one axis; `shape` is the shape of the real
/// output array, and the input holds `shape[axis]/2 + 1` complex elements
/// along that axis.
#[allow(clippy::too_many_arguments)]
pub fn c2r<T: Float + 'static>(
    shape: &[usize],
    stride_in: &[i64],
    stride_out: &[i64],
    axis: usize,
    data_in: &[Complex<T>],
    data_out: &mut [T],
    fct: T,
) -> Result<(), PackFftError>
where
    f64: AsPrimitive<T>,
{
    validate_axes(shape.len(), &[axis])?;
    let mut in_shape = try_vec![0usize; shape.len()];
    in_shape.copy_from_slice(shape);
    in_shape[axis] = shape[axis] / 2 + 1;
    check_layout(&in_shape, stride_in, data_in.len())?;
    check_layout(shape, stride_out, data_out.len())?;
    unsafe {
        general_c2r_raw(
            shape,
            stride_in,
            stride_out,
            axis,
            data_in.as_ptr(),
            data_out.as_mut_ptr(),
            fct,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn random_complex(n: usize) -> Vec<Complex<f64>> {
        let mut rng = rand::rng();
        (0..n)
            .map(|_| Complex::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)))
            .collect()
    }

    fn row_major_strides(shape: &[usize]) -> Vec<i64> {
        let mut strides = vec![0i64; shape.len()];
        let mut acc = 1i64;
        for i in (0..shape.len()).rev() {
            strides[i] = acc;
            acc *= shape[i] as i64;
        }
        strides
    }

    #[test]
    fn test_2d_matches_fiberwise_1d() {
        let shape = [4usize, 6];
        let strides = row_major_strides(&shape);
        let input = random_complex(24);

        // along axis 1: every row transformed standalone
        let mut out = vec![Complex::new(0.0, 0.0); 24];
        c2c(&shape, &strides, &strides, &[1], true, &input, &mut out, 1.0).unwrap();
        let plan = ComplexPlan::<f64>::new(6).unwrap();
        for row in 0..4 {
            let mut fiber: Vec<Complex<f64>> = input[row * 6..(row + 1) * 6].to_vec();
            plan.forward(&mut fiber, 1.0).unwrap();
            for col in 0..6 {
                let got = out[row * 6 + col];
                let want = fiber[col];
                assert!(
                    (got.re - want.re).abs() < 1e-12 && (got.im - want.im).abs() < 1e-12,
                    "row {row} col {col}: {got:?} vs {want:?}"
                );
            }
        }
    }

    #[test]
    fn test_multi_axis_equals_composition() {
        let shape = [4usize, 6];
        let strides = row_major_strides(&shape);
        let input = random_complex(24);

        let mut both = vec![Complex::new(0.0, 0.0); 24];
        c2c(
            &shape, &strides, &strides, &[0, 1], true, &input, &mut both, 1.0,
        )
        .unwrap();

        let mut step = vec![Complex::new(0.0, 0.0); 24];
        c2c(&shape, &strides, &strides, &[0], true, &input, &mut step, 1.0).unwrap();
        let snapshot = step.clone();
        c2c(
            &shape, &strides, &strides, &[1], true, &snapshot, &mut step, 1.0,
        )
        .unwrap();

        // composition in the same axis order is bit-for-bit identical
        assert_eq!(both, step);
    }

    #[test]
    fn test_noncontiguous_input_strides() {
        let shape = [4usize, 6];
        let tight = row_major_strides(&shape);
        // elements every 2 complex slots along axis 1, padded rows
        let loose = [48i64, 2];
        let input = random_complex(24);
        let mut spread = vec![Complex::new(0.0, 0.0); 4 * 48];
        for r in 0..4 {
            for c in 0..6 {
                spread[r * 48 + c * 2] = input[r * 6 + c];
            }
        }

        let mut out_tight = vec![Complex::new(0.0, 0.0); 24];
        c2c(
            &shape,
            &tight,
            &tight,
            &[0, 1],
            true,
            &input,
            &mut out_tight,
            1.0,
        )
        .unwrap();

        let mut out_loose = vec![Complex::new(0.0, 0.0); 24];
        c2c(
            &shape,
            &loose,
            &tight,
            &[0, 1],
            true,
            &spread,
            &mut out_loose,
            1.0,
        )
        .unwrap();

        for (a, b) in out_tight.iter().zip(out_loose.iter()) {
            assert!((a.re - b.re).abs() < 1e-12 && (a.im - b.im).abs() < 1e-12);
        }
    }

    #[test]
    fn test_c2c_roundtrip_3d() {
        let shape = [3usize, 4, 5];
        let strides = row_major_strides(&shape);
        let input = random_complex(60);
        let mut freq = vec![Complex::new(0.0, 0.0); 60];
        c2c(
            &shape,
            &strides,
            &strides,
            &[0, 1, 2],
            true,
            &input,
            &mut freq,
            1.0,
        )
        .unwrap();
        let mut back = vec![Complex::new(0.0, 0.0); 60];
        c2c(
            &shape,
            &strides,
            &strides,
            &[0, 1, 2],
            false,
            &freq,
            &mut back,
            1.0 / 60.0,
        )
        .unwrap();
        for (a, b) in back.iter().zip(input.iter()) {
            assert!((a.re - b.re).abs() < 1e-11 && (a.im - b.im).abs() < 1e-11);
        }
    }

    #[test]
    fn test_hartley_self_inverse() {
        let mut rng = rand::rng();
        let shape = [4usize, 6];
        let strides = row_major_strides(&shape);
        let input: Vec<f64> = (0..24).map(|_| rng.random_range(-1.0..1.0)).collect();
        let mut once = vec![0.0f64; 24];
        hartley(&shape, &strides, &strides, &[0, 1], &input, &mut once, 1.0).unwrap();
        let mut twice = vec![0.0f64; 24];
        hartley(
            &shape,
            &strides,
            &strides,
            &[0, 1],
            &once,
            &mut twice,
            1.0 / 24.0,
        )
        .unwrap();
        for (a, b) in twice.iter().zip(input.iter()) {
            assert!((a - b).abs() < 1e-11, "{a} vs {b}");
        }
    }

    #[test]
    fn test_r2c_c2r_roundtrip() {
        let mut rng = rand::rng();
        for axis_len in [6usize, 7] {
            let shape = [3usize, axis_len];
            let in_strides = row_major_strides(&shape);
            let n_out = axis_len / 2 + 1;
            let out_strides = [n_out as i64, 1];
            let input: Vec<f64> = (0..3 * axis_len).map(|_| rng.random_range(-1.0..1.0)).collect();

            let mut spectrum = vec![Complex::new(0.0, 0.0); 3 * n_out];
            r2c(
                &shape,
                &in_strides,
                &out_strides,
                1,
                &input,
                &mut spectrum,
                1.0,
            )
            .unwrap();

            let mut back = vec![0.0f64; 3 * axis_len];
            c2r(
                &shape,
                &out_strides,
                &in_strides,
                1,
                &spectrum,
                &mut back,
                1.0 / axis_len as f64,
            )
            .unwrap();
            for (a, b) in back.iter().zip(input.iter()) {
                assert!((a - b).abs() < 1e-11, "axis_len={axis_len}: {a} vs {b}");
            }
        }
    }

    #[test]
    fn test_shape_errors() {
        let shape = [4usize, 6];
        let strides = row_major_strides(&shape);
        let input = random_complex(24);
        let mut out = vec![Complex::new(0.0, 0.0); 24];
        assert_eq!(
            c2c(
                &shape,
                &strides,
                &strides,
                &[0, 1, 0],
                true,
                &input,
                &mut out,
                1.0
            ),
            Err(PackFftError::ShapeMismatch(3, 2))
        );
        assert_eq!(
            c2c(&shape, &strides, &strides, &[2], true, &input, &mut out, 1.0),
            Err(PackFftError::AxisOutOfRange(2, 2))
        );
    }

    #[test]
    fn test_out_of_bounds_strides_rejected() {
        let shape = [4usize, 6];
        let strides = row_major_strides(&shape);
        let input = random_complex(23);
        let mut out = vec![Complex::new(0.0, 0.0); 24];
        assert_eq!(
            c2c(&shape, &strides, &strides, &[1], true, &input, &mut out, 1.0),
            Err(PackFftError::StridesOutOfBounds)
        );
    }
}

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
use crate::bluestein::BluesteinFft;
use crate::cfft::CfftPlan;
use crate::err::PackFftError;
use crate::lengths::{cost_guess, good_size, largest_prime_factor};
use crate::rfft::RfftPlan;
use num_complex::Complex;
use num_traits::{AsPrimitive, Float};

fn use_bluestein(length: usize, direct_cost: f64) -> bool {
    if length < 50 || largest_prime_factor(length) as f64 <= (length as f64).sqrt() {
        return false;
    }
    let mut chirp_cost = 2.0 * cost_guess(good_size(2 * length - 1));
    chirp_cost *= 1.5; // fudge factor that appears to give good overall performance
    chirp_cost < direct_cost
}

/// Complex 1-D transform of arbitrary length: a mixed-radix plan when the
/// length is smooth enough, Bluestein's algorithm otherwise.
pub enum ComplexPlan<T> {
    Pack(CfftPlan<T>),
    Blue(BluesteinFft<T>),
}

impl<T: Float + 'static> ComplexPlan<T>
where
    f64: AsPrimitive<T>,
{
    pub fn new(length: usize) -> Result<ComplexPlan<T>, PackFftError> {
        if length == 0 {
            return Err(PackFftError::ZeroSizedFft);
        }
        if use_bluestein(length, cost_guess(length)) {
            Ok(ComplexPlan::Blue(BluesteinFft::new(length)?))
        } else {
            Ok(ComplexPlan::Pack(CfftPlan::new(length)?))
        }
    }

    pub fn length(&self) -> usize {
        match self {
            ComplexPlan::Pack(plan) => plan.length(),
            ComplexPlan::Blue(plan) => plan.length(),
        }
    }

    pub fn forward(&self, c: &mut [Complex<T>], fct: T) -> Result<(), PackFftError> {
        match self {
            ComplexPlan::Pack(plan) => plan.forward(c, fct),
            ComplexPlan::Blue(plan) => plan.forward(c, fct),
        }
    }

    pub fn backward(&self, c: &mut [Complex<T>], fct: T) -> Result<(), PackFftError> {
        match self {
            ComplexPlan::Pack(plan) => plan.backward(c, fct),
            ComplexPlan::Blue(plan) => plan.backward(c, fct),
        }
    }
}

/// Real-valued 1-D transform of arbitrary length over the packed spectrum
/// layout. The direct cost is halved against the chirp-z estimate because the
/// real plan does half the work of a complex one.
pub enum RealPlan<T> {
    Pack(RfftPlan<T>),
    Blue(BluesteinFft<T>),
}

impl<T: Float + 'static> RealPlan<T>
where
    f64: AsPrimitive<T>,
{
    pub fn new(length: usize) -> Result<RealPlan<T>, PackFftError> {
        if length == 0 {
            return Err(PackFftError::ZeroSizedFft);
        }
        if use_bluestein(length, 0.5 * cost_guess(length)) {
            Ok(RealPlan::Blue(BluesteinFft::new(length)?))
        } else {
            Ok(RealPlan::Pack(RfftPlan::new(length)?))
        }
    }

    pub fn length(&self) -> usize {
        match self {
            RealPlan::Pack(plan) => plan.length(),
            RealPlan::Blue(plan) => plan.length(),
        }
    }

    pub fn forward(&self, c: &mut [T], fct: T) -> Result<(), PackFftError> {
        match self {
            RealPlan::Pack(plan) => plan.forward(c, fct),
            RealPlan::Blue(plan) => plan.forward_real(c, fct),
        }
    }

    pub fn backward(&self, c: &mut [T], fct: T) -> Result<(), PackFftError> {
        match self {
            RealPlan::Pack(plan) => plan.backward(c, fct),
            RealPlan::Blue(plan) => plan.backward_real(c, fct),
        }
    }
}

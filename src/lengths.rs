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
use num_integer::Roots;

pub(crate) fn largest_prime_factor(n: usize) -> usize {
    let mut n = n;
    let mut res = 1usize;
    while (n & 1) == 0 {
        res = 2;
        n >>= 1;
    }
    let mut limit = n.sqrt();
    let mut x = 3usize;
    while x <= limit {
        while n % x == 0 {
            res = x;
            n /= x;
            limit = n.sqrt();
        }
        x += 2;
    }
    if n > 1 {
        res = n;
    }
    res
}

/// Rough operation count of a mixed-radix transform of length `n`, used only
/// to decide between the direct and the chirp-z path. Factors above 5 carry a
/// penalty since they run through the generic radix kernel.
pub(crate) fn cost_guess(n: usize) -> f64 {
    const LFP: f64 = 1.1;
    let ni = n;
    let mut n = n;
    let mut result = 0f64;
    while (n & 1) == 0 {
        result += 2.0;
        n >>= 1;
    }
    let mut limit = n.sqrt();
    let mut x = 3usize;
    while x <= limit {
        while n % x == 0 {
            result += if x <= 5 { x as f64 } else { LFP * x as f64 };
            n /= x;
            limit = n.sqrt();
        }
        x += 2;
    }
    if n > 1 {
        result += if n <= 5 { n as f64 } else { LFP * n as f64 };
    }
    result * ni as f64
}

/// Returns the smallest composite of 2, 3, 5, 7 and 11 which is >= `n`.
///
/// The bounded brute-force search finishes in microseconds for any realistic
/// `n`, including values near `usize::MAX` on 64-bit targets.
pub fn good_size(n: usize) -> usize {
    if n <= 12 {
        return n;
    }
    let mut bestfac = 2 * n;
    let mut f2 = 1usize;
    while f2 < bestfac {
        let mut f23 = f2;
        while f23 < bestfac {
            let mut f235 = f23;
            while f235 < bestfac {
                let mut f2357 = f235;
                while f2357 < bestfac {
                    let mut f235711 = f2357;
                    while f235711 < bestfac {
                        if f235711 >= n {
                            bestfac = f235711;
                        }
                        f235711 *= 11;
                    }
                    f2357 *= 7;
                }
                f235 *= 5;
            }
            f23 *= 3;
        }
        f2 *= 2;
    }
    bestfac
}

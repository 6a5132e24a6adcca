//! Dirichlet character groups.
//!
//! `(Z/qZ)^*` is split into cyclic components, one per odd prime power and
//! up to two for the power of two (`-1` and `5`). A character is fixed by one
//! exponent per component; character index `j` is the mixed-radix number
//! formed by those exponents with the last component varying fastest, so
//! index 0 is always the principal character.

use std::f64::consts::PI;

use lscan_core::errors::{ErrorInfo, LscanError};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

const NOT_A_UNIT: u32 = u32::MAX;

/// One cyclic factor of the unit group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CyclicComponent {
    /// Prime whose power carries this component.
    pub prime: u64,
    /// Prime power the residue is reduced by before taking the log.
    pub prime_power: u64,
    /// Order of the component.
    pub order: u64,
    /// Generator used for the discrete log table.
    pub generator: u64,
    #[serde(skip)]
    logs: Vec<u32>,
}

impl CyclicComponent {
    fn log_of(&self, residue: u64) -> Option<u64> {
        let value = self.logs[(residue % self.prime_power) as usize];
        (value != NOT_A_UNIT).then_some(value as u64)
    }
}

/// The group of Dirichlet characters modulo `q`.
///
/// Immutable after construction and safe to share read-only across threads.
#[derive(Debug, Clone)]
pub struct DirichletGroup {
    modulus: u64,
    size: u64,
    exponent: u64,
    components: Vec<CyclicComponent>,
    units: Vec<u64>,
    unit_phases: Vec<Vec<u64>>,
    roots: Vec<Complex64>,
}

impl DirichletGroup {
    /// Builds the character group for `modulus`.
    pub fn new(modulus: u64) -> Result<Self, LscanError> {
        if modulus < 1 {
            return Err(LscanError::invalid_modulus(modulus));
        }
        if modulus > u32::MAX as u64 {
            return Err(LscanError::InvalidModulus(
                ErrorInfo::new("modulus_too_large", "modulus exceeds the supported range")
                    .with_context("modulus", modulus),
            ));
        }
        let components = factorize(modulus)
            .into_iter()
            .flat_map(|(prime, power)| prime_power_components(prime, power))
            .collect::<Vec<_>>();
        let size = components.iter().map(|c| c.order).product::<u64>();
        let exponent = components.iter().map(|c| c.order).fold(1, lcm);
        let units = (1..=modulus)
            .filter(|&a| gcd(a, modulus) == 1)
            .collect::<Vec<_>>();

        // Log vectors are stored pre-scaled to the group exponent so a
        // character value is a single lookup in `roots`.
        let unit_phases = units
            .iter()
            .map(|&a| {
                components
                    .iter()
                    .map(|c| {
                        let log = c.log_of(a).unwrap_or(0);
                        log * (exponent / c.order)
                    })
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        let roots = (0..exponent).map(|k| root_of_unity(k, exponent)).collect();

        Ok(Self {
            modulus,
            size,
            exponent,
            components,
            units,
            unit_phases,
            roots,
        })
    }

    /// Modulus `q` of the group.
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Number of characters, `phi(q)`.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Least common multiple of the component orders.
    pub fn exponent(&self) -> u64 {
        self.exponent
    }

    /// Cyclic components in index order.
    pub fn components(&self) -> &[CyclicComponent] {
        &self.components
    }

    /// Residues `1 <= a <= q` coprime to `q`, ascending.
    pub fn units(&self) -> &[u64] {
        &self.units
    }

    /// Returns true when `index` names a character of this group.
    pub fn contains(&self, index: u64) -> bool {
        index < self.size
    }

    /// Resolves the character with the given zero-based index.
    pub fn character(&self, index: u64) -> Result<DirichletCharacter<'_>, LscanError> {
        if !self.contains(index) {
            return Err(LscanError::invalid_character_index(
                self.modulus,
                index,
                self.size,
            ));
        }
        let mut digits = vec![0u64; self.components.len()];
        let mut rest = index;
        for (slot, component) in digits.iter_mut().zip(&self.components).rev() {
            *slot = rest % component.order;
            rest /= component.order;
        }
        Ok(DirichletCharacter {
            group: self,
            index,
            digits,
        })
    }

    /// Iterates over every character in ascending index order.
    pub fn characters(&self) -> impl Iterator<Item = DirichletCharacter<'_>> + '_ {
        (0..self.size).filter_map(move |index| self.character(index).ok())
    }

    fn phase(&self, unit_slot: usize, digits: &[u64]) -> u64 {
        self.unit_phases[unit_slot]
            .iter()
            .zip(digits)
            .fold(0, |acc, (phase, digit)| (acc + phase * digit) % self.exponent)
    }
}

/// A character of a [`DirichletGroup`], borrowed from its group.
#[derive(Debug, Clone)]
pub struct DirichletCharacter<'g> {
    group: &'g DirichletGroup,
    index: u64,
    digits: Vec<u64>,
}

impl<'g> DirichletCharacter<'g> {
    /// Zero-based index within the group.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Group the character belongs to.
    pub fn group(&self) -> &'g DirichletGroup {
        self.group
    }

    /// True for the principal character.
    pub fn is_principal(&self) -> bool {
        self.digits.iter().all(|&d| d == 0)
    }

    /// Multiplicative order of the character.
    pub fn order(&self) -> u64 {
        self.digits
            .iter()
            .zip(&self.group.components)
            .map(|(&digit, component)| component.order / gcd(digit, component.order))
            .fold(1, lcm)
    }

    /// `chi(-1)`, either `1` or `-1`.
    pub fn parity(&self) -> i8 {
        if self.value(self.group.modulus.saturating_sub(1)).re < 0.0 {
            -1
        } else {
            1
        }
    }

    /// Evaluates `chi(n)`; zero when `gcd(n, q) > 1`.
    pub fn value(&self, n: u64) -> Complex64 {
        let q = self.group.modulus;
        let residue = if q == 1 { 1 } else { n % q };
        match self.group.units.binary_search(&residue) {
            Ok(slot) => self.value_at_unit(slot),
            Err(_) => Complex64::new(0.0, 0.0),
        }
    }

    /// Value at the `slot`-th entry of [`DirichletGroup::units`].
    pub fn value_at_unit(&self, slot: usize) -> Complex64 {
        let phase = self.group.phase(slot, &self.digits);
        self.group.roots[phase as usize]
    }

    /// Values on every unit, aligned with [`DirichletGroup::units`].
    pub fn unit_values(&self) -> Vec<Complex64> {
        (0..self.group.units.len())
            .map(|slot| self.value_at_unit(slot))
            .collect()
    }
}

/// `exp(2 pi i k / n)` with exact values on the quarter turns.
fn root_of_unity(k: u64, n: u64) -> Complex64 {
    let k = k % n;
    if (4 * k) % n == 0 {
        return match 4 * k / n {
            0 => Complex64::new(1.0, 0.0),
            1 => Complex64::new(0.0, 1.0),
            2 => Complex64::new(-1.0, 0.0),
            _ => Complex64::new(0.0, -1.0),
        };
    }
    Complex64::cis(2.0 * PI * k as f64 / n as f64)
}

fn prime_power_components(prime: u64, power: u32) -> Vec<CyclicComponent> {
    let prime_power = prime.pow(power);
    if prime == 2 {
        return match power {
            1 => Vec::new(),
            2 => vec![two_adic_sign(prime_power)],
            _ => vec![two_adic_sign(prime_power), two_adic_five(prime_power)],
        };
    }
    let order = prime_power / prime * (prime - 1);
    let generator = primitive_root_prime_power(prime, power);
    let mut logs = vec![NOT_A_UNIT; prime_power as usize];
    let mut value = 1u64;
    for exponent in 0..order {
        logs[value as usize] = exponent as u32;
        value = mul_mod(value, generator, prime_power);
    }
    vec![CyclicComponent {
        prime,
        prime_power,
        order,
        generator,
        logs,
    }]
}

fn two_adic_sign(prime_power: u64) -> CyclicComponent {
    let mut logs = vec![NOT_A_UNIT; prime_power as usize];
    for residue in (1..prime_power).step_by(2) {
        logs[residue as usize] = if residue % 4 == 1 { 0 } else { 1 };
    }
    CyclicComponent {
        prime: 2,
        prime_power,
        order: 2,
        generator: prime_power - 1,
        logs,
    }
}

fn two_adic_five(prime_power: u64) -> CyclicComponent {
    let order = prime_power / 4;
    let mut logs = vec![NOT_A_UNIT; prime_power as usize];
    let mut value = 1u64;
    for exponent in 0..order {
        logs[value as usize] = exponent as u32;
        logs[(prime_power - value) as usize] = exponent as u32;
        value = mul_mod(value, 5, prime_power);
    }
    CyclicComponent {
        prime: 2,
        prime_power,
        order,
        generator: 5,
        logs,
    }
}

fn primitive_root_prime_power(prime: u64, power: u32) -> u64 {
    let phi = prime - 1;
    let factors = factorize(phi);
    let mut generator = (2..prime)
        .find(|&g| {
            factors
                .iter()
                .all(|&(r, _)| pow_mod(g, phi / r, prime) != 1)
        })
        .unwrap_or(1);
    if power > 1 && pow_mod(generator, phi, prime * prime) == 1 {
        generator += prime;
    }
    generator
}

/// Prime factorization by trial division, ascending primes.
pub(crate) fn factorize(mut n: u64) -> Vec<(u64, u32)> {
    let mut factors = Vec::new();
    let mut p = 2u64;
    while p * p <= n {
        if n % p == 0 {
            let mut power = 0;
            while n % p == 0 {
                n /= p;
                power += 1;
            }
            factors.push((p, power));
        }
        p += if p == 2 { 1 } else { 2 };
    }
    if n > 1 {
        factors.push((n, 1));
    }
    factors
}

pub(crate) fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

fn lcm(a: u64, b: u64) -> u64 {
    a / gcd(a, b) * b
}

fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}

fn pow_mod(mut base: u64, mut exp: u64, m: u64) -> u64 {
    let mut result = 1 % m;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, m);
        }
        base = mul_mod(base, base, m);
        exp >>= 1;
    }
    result
}

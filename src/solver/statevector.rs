// Dense statevector for diagonal-cost QAOA circuits

/// Complex amplitude of one computational basis state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Amplitude {
    pub re: f64,
    pub im: f64,
}

impl Amplitude {
    pub fn norm_sqr(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// Multiplies by e^{-iθ}.
    fn rotate(self, theta: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self {
            re: self.re * cos + self.im * sin,
            im: self.im * cos - self.re * sin,
        }
    }
}

/// State of `n` qubits; basis index bit `k` is the value of variable `k`.
#[derive(Debug, Clone)]
pub struct StateVector {
    num_qubits: usize,
    amplitudes: Vec<Amplitude>,
}

impl StateVector {
    /// Uniform superposition |+⟩^n.
    pub fn uniform(num_qubits: usize) -> Self {
        let dim = 1usize << num_qubits;
        let amp = (dim as f64).sqrt().recip();
        Self {
            num_qubits,
            amplitudes: vec![Amplitude { re: amp, im: 0.0 }; dim],
        }
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Applies e^{-iγC} for a diagonal cost given per basis state.
    pub fn apply_cost(&mut self, gamma: f64, energies: &[f64]) {
        for (amp, &energy) in self.amplitudes.iter_mut().zip(energies) {
            *amp = amp.rotate(gamma * energy);
        }
    }

    /// Applies RX(2β) to every qubit.
    pub fn apply_mixer(&mut self, beta: f64) {
        let (sin, cos) = beta.sin_cos();
        for qubit in 0..self.num_qubits {
            let mask = 1usize << qubit;
            for i in 0..self.amplitudes.len() {
                if i & mask != 0 {
                    continue;
                }
                let a = self.amplitudes[i];
                let b = self.amplitudes[i | mask];
                // [cos, -i sin; -i sin, cos]
                self.amplitudes[i] = Amplitude {
                    re: cos * a.re + sin * b.im,
                    im: cos * a.im - sin * b.re,
                };
                self.amplitudes[i | mask] = Amplitude {
                    re: cos * b.re + sin * a.im,
                    im: cos * b.im - sin * a.re,
                };
            }
        }
    }

    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    pub fn norm(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum::<f64>().sqrt()
    }

    /// ⟨ψ|C|ψ⟩ for a diagonal cost.
    pub fn expectation(&self, energies: &[f64]) -> f64 {
        self.amplitudes
            .iter()
            .zip(energies)
            .map(|(a, e)| a.norm_sqr() * e)
            .sum()
    }
}

/// Bit `k` of `index` as a 0/1 value.
pub fn bit_values(index: usize, num_qubits: usize) -> Vec<f64> {
    (0..num_qubits)
        .map(|k| if index >> k & 1 == 1 { 1.0 } else { 0.0 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn uniform_state_is_normalized() {
        let state = StateVector::uniform(3);
        assert_eq!(state.dim(), 8);
        assert_relative_eq!(state.norm(), 1.0, epsilon = 1e-12);
        for p in state.probabilities() {
            assert_relative_eq!(p, 0.125, epsilon = 1e-12);
        }
    }

    #[test]
    fn single_qubit_plus_state() {
        let state = StateVector::uniform(1);
        assert_relative_eq!(state.amplitudes[0].re, std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-12);
    }

    #[test]
    fn layers_preserve_norm() {
        let energies: Vec<f64> = (0..16).map(|i| i as f64 * 0.3 - 1.0).collect();
        let mut state = StateVector::uniform(4);
        for layer in 0..3 {
            state.apply_cost(0.4 + layer as f64, &energies);
            state.apply_mixer(0.7 - layer as f64 * 0.2);
        }
        assert_relative_eq!(state.norm(), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn mixer_leaves_plus_state_unchanged() {
        let mut state = StateVector::uniform(2);
        state.apply_mixer(0.9);
        for p in state.probabilities() {
            assert_relative_eq!(p, 0.25, epsilon = 1e-12);
        }
    }

    #[test]
    fn phase_then_mixer_flips_qubit() {
        // e^{-iπ/2 Z'} turns |+⟩ into (|0⟩ - i|1⟩)/√2, which RX(π/2) sends to |1⟩.
        let mut state = StateVector::uniform(1);
        state.apply_cost(std::f64::consts::FRAC_PI_2, &[0.0, 1.0]);
        state.apply_mixer(std::f64::consts::FRAC_PI_4);
        let probs = state.probabilities();
        assert_relative_eq!(probs[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(probs[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn expectation_of_uniform_state_is_mean_energy() {
        let energies = [1.0, 2.0, 3.0, 6.0];
        let state = StateVector::uniform(2);
        assert_relative_eq!(state.expectation(&energies), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn bit_values_are_little_endian() {
        assert_eq!(bit_values(0b101, 3), vec![1.0, 0.0, 1.0]);
    }
}

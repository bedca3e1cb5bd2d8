use validator::{Validate, ValidationError};

/// How each chain's starting grid is prepared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InitMode {
    /// Every spin +1.
    Ordered,
    /// Each spin independently +1/-1.
    Random,
}

impl TryFrom<&str> for InitMode {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "ordered" => Ok(Self::Ordered),
            "random" => Ok(Self::Random),
            _ => Err(format!(
                "unknown init mode '{s}', expected 'ordered' or 'random'"
            )),
        }
    }
}

/// Which tail-window observable a scan evaluates per chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Observable {
    Magnetization,
    Susceptibility,
}

impl TryFrom<&str> for Observable {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "magnetization" => Ok(Self::Magnetization),
            "susceptibility" => Ok(Self::Susceptibility),
            _ => Err(format!(
                "unknown observable '{s}', expected 'magnetization' or 'susceptibility'"
            )),
        }
    }
}

fn validate_chain_config(cfg: &ChainConfig) -> Result<(), ValidationError> {
    if cfg.side < 1 {
        return Err(ValidationError::new("side must be >= 1"));
    }
    if cfg.n_sweeps < 1 {
        return Err(ValidationError::new("n_sweeps must be >= 1"));
    }
    if !cfg.beta.is_finite() {
        return Err(ValidationError::new("beta must be finite"));
    }
    if !cfg.coupling.is_finite() {
        return Err(ValidationError::new("coupling must be finite"));
    }
    Ok(())
}

/// Parameters of one Markov chain.
#[derive(Debug, Clone, Validate)]
#[validate(schema(function = "validate_chain_config"))]
pub struct ChainConfig {
    /// Lattice edge length N.
    pub side: usize,
    /// Number of sweeps (N^2 attempted flips each).
    pub n_sweeps: usize,
    /// Inverse temperature.
    pub beta: f64,
    /// Coupling constant J (positive = ferromagnetic).
    pub coupling: f64,
    pub init: InitMode,
    /// Seed of the chain-local PRNG stream.
    pub seed: u64,
}

fn validate_scan_config(cfg: &ScanConfig) -> Result<(), ValidationError> {
    if cfg.sizes.is_empty() {
        return Err(ValidationError::new("sizes must not be empty"));
    }
    if cfg.sizes.iter().any(|&n| n < 1) {
        return Err(ValidationError::new("every lattice size must be >= 1"));
    }
    if cfg.betas.is_empty() {
        return Err(ValidationError::new("betas must not be empty"));
    }
    if cfg.betas.iter().any(|b| !b.is_finite()) {
        return Err(ValidationError::new("every beta must be finite"));
    }
    if cfg.sweeps_per_size.len() != cfg.sizes.len() {
        return Err(ValidationError::new(
            "sweeps_per_size must have one entry per lattice size",
        ));
    }
    if cfg.tail_per_size.len() != cfg.sizes.len() {
        return Err(ValidationError::new(
            "tail_per_size must have one entry per lattice size",
        ));
    }
    for (&tail, &sweeps) in cfg.tail_per_size.iter().zip(cfg.sweeps_per_size.iter()) {
        if sweeps < 1 {
            return Err(ValidationError::new("every sweep count must be >= 1"));
        }
        if tail < 1 || tail > sweeps {
            return Err(ValidationError::new(
                "every tail length must satisfy 1 <= tail <= sweeps",
            ));
        }
    }
    if cfg.n_chains < 1 {
        return Err(ValidationError::new("n_chains must be >= 1"));
    }
    if !cfg.coupling.is_finite() {
        return Err(ValidationError::new("coupling must be finite"));
    }
    Ok(())
}

/// Parameters of a batch scan over lattice sizes and inverse temperatures.
///
/// Each of `n_chains` independent chains performs one full pass over the
/// (size, beta) cross product; results are averaged across chains.
#[derive(Debug, Clone, Validate)]
#[validate(schema(function = "validate_scan_config"))]
pub struct ScanConfig {
    pub sizes: Vec<usize>,
    pub betas: Vec<f64>,
    /// Sweeps per chain, one entry per lattice size.
    pub sweeps_per_size: Vec<usize>,
    /// Equilibrated-tail length, one entry per lattice size.
    pub tail_per_size: Vec<usize>,
    /// Independent chains to average over.
    pub n_chains: usize,
    pub init: InitMode,
    pub coupling: f64,
    pub observable: Observable,
    /// Chain `i` draws from a PRNG seeded `base_seed + i`.
    pub base_seed: u64,
}

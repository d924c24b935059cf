use serde::Deserialize;

/// Construction parameters of an [`Lstm`](super::Lstm) cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LstmConfig {
    /// Width of each input row.
    pub input_size: usize,
    /// Width of the hidden and cell state, and of each output row.
    pub hidden_size: usize,
    /// Amount of timesteps (rows) every `forward` call consumes.
    pub sequence_size: usize,
}

impl LstmConfig {
    pub fn new(input_size: usize, hidden_size: usize, sequence_size: usize) -> Self {
        Self {
            input_size,
            hidden_size,
            sequence_size,
        }
    }
}

/// Construction parameters of a [`Dense`](super::Dense) projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DenseConfig {
    pub input_size: usize,
    pub output_size: usize,
    /// Rows of the bias, the bias is stored already expanded to the sequence length.
    pub sequence_size: usize,
}

impl DenseConfig {
    pub fn new(input_size: usize, output_size: usize, sequence_size: usize) -> Self {
        Self {
            input_size,
            output_size,
            sequence_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lstm_config_from_json() {
        let config: LstmConfig = serde_json::from_str(
            r#"{ "input_size": 129, "hidden_size": 300, "sequence_size": 100 }"#,
        )
        .unwrap();

        assert_eq!(config, LstmConfig::new(129, 300, 100));
    }

    #[test]
    fn dense_config_missing_field() {
        let res: serde_json::Result<DenseConfig> =
            serde_json::from_str(r#"{ "input_size": 300, "output_size": 2580 }"#);

        assert!(res.is_err());
    }
}

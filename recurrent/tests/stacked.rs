use matrix::{
    Matrix,
    initialization::{RandWeightGen, WeightGen},
};
use recurrent::{DenseConfig, Layer, LayerErr, Lstm, LstmConfig, Sequential};

const INPUT_SIZE: usize = 129;
const HIDDEN_SIZE: usize = 300;
const OUTPUT_SIZE: usize = 2580;
const SEQUENCE_SIZE: usize = 100;

fn stacked_model<W: WeightGen>(weight_gen: &mut W) -> Sequential {
    let first = LstmConfig::new(INPUT_SIZE, HIDDEN_SIZE, SEQUENCE_SIZE);
    let inner = LstmConfig::new(HIDDEN_SIZE, HIDDEN_SIZE, SEQUENCE_SIZE);

    Sequential::new([
        Layer::lstm(first, weight_gen),
        Layer::lstm(inner, weight_gen),
        Layer::lstm(inner, weight_gen),
        Layer::lstm(inner, weight_gen),
        Layer::dense(
            DenseConfig::new(HIDDEN_SIZE, OUTPUT_SIZE, SEQUENCE_SIZE),
            weight_gen,
        ),
    ])
}

#[test]
fn four_lstms_and_projection() {
    let mut weight_gen = RandWeightGen::seeded(2024);
    let mut model = stacked_model(&mut weight_gen);
    let input = Matrix::from_gen(SEQUENCE_SIZE, INPUT_SIZE, &mut weight_gen);

    let output = model.forward(&input).unwrap();

    assert_eq!(output.shape(), (SEQUENCE_SIZE, OUTPUT_SIZE));
    assert!(output.iter().all(f32::is_finite));
}

#[test]
fn chaining_cells_by_hand() {
    let mut weight_gen = RandWeightGen::seeded(5);
    let mut first = Lstm::new(LstmConfig::new(8, 6, 10), &mut weight_gen);
    let mut second = Lstm::new(LstmConfig::new(6, 6, 10), &mut weight_gen);
    let input = Matrix::from_gen(10, 8, &mut weight_gen);

    let out_1 = first.forward(&input).unwrap();
    let out_2 = second.forward(&out_1).unwrap();

    assert_eq!(out_1.shape(), (10, 6));
    assert_eq!(out_2.shape(), (10, 6));
}

#[test]
fn hidden_outputs_are_bounded() {
    // h = o ⊙ tanh(..) with o in (0, 1), so every output lies in (-1, 1)
    let mut weight_gen = RandWeightGen::seeded(77);
    let mut lstm = Lstm::new(LstmConfig::new(16, 12, 20), &mut weight_gen);
    let input = Matrix::from_gen(20, 16, &mut weight_gen);

    let out = lstm.forward(&input).unwrap();

    assert!(out.iter().all(|v| v > -1. && v <= 1.));
}

#[test]
fn stacked_sequence_length_mismatch() {
    let mut weight_gen = RandWeightGen::seeded(1);
    let mut model = Sequential::new([
        Layer::lstm(LstmConfig::new(4, 3, 5), &mut weight_gen),
        Layer::lstm(LstmConfig::new(3, 3, 5), &mut weight_gen),
    ]);

    let err = model.forward(&Matrix::zeros(4, 4)).unwrap_err();

    assert_eq!(err, LayerErr::SequenceLength { got: 4, expected: 5 });
}

#[test]
fn error_source_is_the_matrix_error() {
    use std::error::Error;

    let mut lstm = Lstm::seeded(LstmConfig::new(4, 3, 5), 1);
    let err = lstm.forward(&Matrix::zeros(5, 7)).unwrap_err();

    assert!(err.source().is_some());
    assert!(err.to_string().contains("multiply"));
}

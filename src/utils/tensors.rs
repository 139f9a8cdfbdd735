use burn::tensor::{backend::Backend, Data, Int, Shape, Tensor};

/// Pad (or truncate) every token sequence to exactly `seq_length`, filling with `pad_token`
pub fn pad_to<B: Backend>(
    pad_token: usize,
    tokens_list: Vec<Vec<usize>>,
    seq_length: usize,
    device: &B::Device,
) -> Tensor<B, 2, Int> {
    let batch_size = tokens_list.len();

    let mut values = vec![pad_token as i64; batch_size * seq_length];

    for (index, tokens) in tokens_list.into_iter().enumerate() {
        let row = &mut values[index * seq_length..(index + 1) * seq_length];

        for (slot, token) in row.iter_mut().zip(tokens) {
            *slot = token as i64;
        }
    }

    let data: Data<B::IntElem, 2> =
        Data::new(values, Shape::new([batch_size, seq_length])).convert();

    Tensor::from_data(data, device)
}

#[cfg(test)]
mod tests {
    use burn::backend::{ndarray::NdArrayDevice, NdArray};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn pads_and_truncates() {
        let device = NdArrayDevice::Cpu;

        let tokens = pad_to::<NdArray>(0, vec![vec![5, 6], vec![1, 2, 3, 4, 5]], 4, &device);

        assert_eq!(tokens.dims(), [2, 4]);
        assert_eq!(
            tokens.into_data().convert::<i64>().value,
            vec![5, 6, 0, 0, 1, 2, 3, 4]
        );
    }
}

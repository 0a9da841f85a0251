#![cfg(feature = "local-model")]

use candle_core::{DType, Device, Tensor};
use docqa_embed::masked_mean_l2;

#[test]
fn padding_tokens_do_not_shift_the_mean() {
    let dev = Device::Cpu;
    // Batch of one: three tokens, hidden dim 2, last token is padding.
    let h = Tensor::from_slice(&[3.0f32, 0.0, 1.0, 0.0, 100.0, 100.0], (1, 3, 2), &dev).unwrap();
    let mask = Tensor::from_slice(&[1u32, 1, 0], (1, 3), &dev).unwrap();
    let out = masked_mean_l2(&h, &mask).unwrap();
    let v: Vec<Vec<f32>> = out.to_vec2().unwrap();
    // mean of [3,0] and [1,0] is [2,0], normalised to [1,0]
    assert!((v[0][0] - 1.0).abs() < 1e-5);
    assert!(v[0][1].abs() < 1e-5);
    assert_eq!(out.dtype(), DType::F32);
}

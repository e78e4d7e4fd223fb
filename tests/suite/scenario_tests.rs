//! End-to-end expression scenarios.

use cubek_ttl::{Idx, Tensor, TensorExt, TensorMutExt, TensorSpan, bind};

const I: Idx<'i'> = Idx;
const J: Idx<'j'> = Idx;
const K: Idx<'k'> = Idx;

#[test]
fn test_scalar_bind_round_trip() {
    let mut x = 0;
    {
        let mut b = bind(&mut x, ());
        b.set(1);
    }
    assert_eq!(x, 1);
}

#[test]
fn test_trace() {
    let a = [[1, 0], [0, 2]];
    assert_eq!(bind(&a, (I, I)).value(), 3);
}

#[test]
fn test_projection() {
    let a = [[1, 2], [3, 4]];
    let column = bind(&a, (I, 1usize));
    assert_eq!(column.extents().as_slice(), &[2]);
    assert_eq!([column.evaluate(&[0]), column.evaluate(&[1])], [2, 4]);
}

#[test]
fn test_sum_with_permuted_outer_order() {
    let v = [[0, 1], [2, 0]];
    let w = [[0, 2], [1, 0]];
    let s = bind(&v, (I, J)) + bind(&w, (J, I));
    assert_eq!(s.evaluate(&[0, 1]), 2);
    assert_eq!(s.evaluate(&[1, 0]), 4);
}

#[test]
fn test_matrix_vector_product() {
    let a = [[1, 2], [4, 3]];
    let x = [1, 2];
    let y = bind(&a, (I, J)) * bind(&x, J);
    assert_eq!(y.evaluate(&[0]), 5);
    assert_eq!(y.evaluate(&[1]), 10);
}

#[test]
fn test_assignment_idempotence() {
    let a = [[1.0, 2.0], [3.0, 4.0]];
    let b = [[0.5, 0.5], [0.5, 0.5]];
    let mut c = [[0.0; 2]; 2];
    {
        let mut dst = bind(&mut c, (I, J));
        dst <<= bind(&a, (I, K)) * bind(&b, (K, J));
    }

    let expected = bind(&a, (I, K)) * bind(&b, (K, J));
    let read_back = bind(&c, (I, J));
    for i in 0..2 {
        for j in 0..2 {
            assert_eq!(read_back.evaluate(&[i, j]), expected.evaluate(&[i, j]));
        }
    }
}

#[test]
fn test_span_operands() {
    let data = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
    let m = TensorSpan::new(&data, [2, 3]);
    let ones = [1.0f32; 3];
    let row_sums = bind(m, (I, J)) * bind(&ones, J);
    assert_eq!(row_sums.evaluate(&[0]), 6.0);
    assert_eq!(row_sums.evaluate(&[1]), 15.0);
}

#[test]
fn test_frobenius_inner_product() {
    let a = vec![vec![1, 2], vec![3, 4]];
    let b = vec![vec![5, 6], vec![7, 8]];
    let dot = bind(&a, (I, J)) * bind(&b, (I, J));
    assert_eq!(dot.value(), 5 + 12 + 21 + 32);
}

#[test]
fn test_half_precision() {
    use half::f16;

    let x = [f16::from_f32(1.0), f16::from_f32(2.0)];
    let norm = bind(&x, I) * bind(&x, I);
    assert_eq!(norm.value(), f16::from_f32(5.0));
}

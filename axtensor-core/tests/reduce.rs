use approx::assert_relative_eq;
use axtensor_core::{Seed, Tensor};

macro_rules! test_reduce_dtype {
    ($dtype:ty, $dtype_mod:ident) => {
        mod $dtype_mod {
            use super::*;

            fn seq() -> Tensor<$dtype> {
                Tensor::<$dtype>::arange(&[2, 3, 5], 0 as $dtype, 1 as $dtype).unwrap()
            }

            #[test]
            fn sum_innermost() {
                let s = seq().sum_along_axis(0).unwrap();
                assert_eq!(s.dims(), &[2, 3]);
                assert_eq!(s.get(&[0, 0]).unwrap(), 10 as $dtype);
                assert_eq!(s.get(&[1, 2]).unwrap(), 135 as $dtype);
                assert_eq!(
                    s.data(),
                    &[10, 35, 60, 85, 110, 135].map(|x| x as $dtype)
                );
            }

            #[test]
            fn sum_middle() {
                let s = seq().sum_along_axis(1).unwrap();
                assert_eq!(s.dims(), &[2, 5]);
                // 0 + 5 + 10, 1 + 6 + 11, ...
                assert_eq!(s.get(&[0, 0]).unwrap(), 15 as $dtype);
                assert_eq!(s.get(&[0, 4]).unwrap(), 27 as $dtype);
                assert_eq!(s.get(&[1, 0]).unwrap(), 60 as $dtype);
            }

            #[test]
            fn sum_outermost() {
                let s = seq().sum_along_axis(2).unwrap();
                assert_eq!(s.dims(), &[3, 5]);
                assert_eq!(s.get(&[0, 0]).unwrap(), 15 as $dtype);
                assert_eq!(s.get(&[2, 4]).unwrap(), (14 + 29) as $dtype);
            }

            #[test]
            fn max_innermost_and_outermost() {
                let m = seq().max_along_axis(0).unwrap();
                assert_eq!(m.data(), &[4, 9, 14, 19, 24, 29].map(|x| x as $dtype));
                let m = seq().max_along_axis(2).unwrap();
                let expected: Vec<$dtype> = (15..30).map(|x| x as $dtype).collect();
                assert_eq!(m.data(), expected.as_slice());
            }

            #[test]
            fn min_middle() {
                let m = seq().min_along_axis(1).unwrap();
                let expected: Vec<$dtype> = (0..5).chain(15..20).map(|x| x as $dtype).collect();
                assert_eq!(m.data(), expected.as_slice());
            }

            #[test]
            fn source_is_untouched() {
                let t = seq();
                let before = t.clone();
                let _ = t.sum_along_axis(1).unwrap();
                let _ = t.max_along_axis(0).unwrap();
                assert_eq!(t, before);
            }
        }
    };
}

test_reduce_dtype!(f32, f32_test);
test_reduce_dtype!(f64, f64_test);
test_reduce_dtype!(i32, i32_test);
test_reduce_dtype!(i64, i64_test);
test_reduce_dtype!(u32, u32_test);

#[test]
fn average_is_sum_over_length() {
    let t = Tensor::<f64>::arange(&[2, 3, 5], 0.5, 0.25).unwrap();
    for axis in 0..3 {
        let len = t.layout().dim_along(axis).unwrap() as f64;
        let avg = t.average_along_axis(axis).unwrap();
        let sum = t.sum_along_axis(axis).unwrap();
        assert_eq!(avg.dims(), sum.dims());
        for (a, s) in avg.data().iter().zip(sum.data()) {
            assert_relative_eq!(*a, s / len, max_relative = 1e-12);
        }
    }
}

#[test]
fn weighted_average_divides_by_axis_length() {
    let t = Tensor::<f32>::from_vec(&[2, 2], vec![1., 2., 3., 4.]).unwrap();
    let avg = t.weighted_average_along_axis(0, &[2., 4.]).unwrap();
    // (2*1 + 4*2) / 2, (2*3 + 4*4) / 2
    assert_eq!(avg.data(), &[5., 11.]);
}

#[test]
fn weighted_sum_along_outer_axis() {
    let t = Tensor::<i64>::arange(&[3, 2], 1, 1).unwrap();
    let s = t.weighted_sum_along_axis(1, &[1, 0, -1]).unwrap();
    // [1 - 5, 2 - 6]
    assert_eq!(s.data(), &[-4, -4]);
}

#[test]
fn integer_average_truncates_like_integer_division() {
    let t = Tensor::<i32>::from_vec(&[1, 3], vec![1, 1, 2]).unwrap();
    let avg = t.average_along_axis(0).unwrap();
    assert_eq!(avg.data(), &[1]);
}

#[test]
fn average_fails_when_length_is_not_representable() {
    let t = Tensor::<u8>::zeros(&[300]).unwrap();
    assert!(t.average_along_axis(0).is_err());
}

#[test]
fn max_seeds_each_window_from_its_own_elements() {
    // Element 1 of storage is the global maximum; no other window contains it.
    let t = Tensor::<f32>::from_vec(&[3, 2], vec![-5., 100., -3., -4., -9., -1.]).unwrap();
    let m = t.max_along_axis(0).unwrap();
    assert_eq!(m.data(), &[100., -3., -1.]);
    let m = t.max_along_axis(1).unwrap();
    assert_eq!(m.data(), &[-3., 100.]);
}

#[test]
fn reducing_rank_one_gives_rank_zero() {
    let t = Tensor::<f64>::arange(&[4], 1., 1.).unwrap();
    let s = t.sum_along_axis(0).unwrap();
    assert_eq!(s.rank(), 0);
    assert_eq!(s.data(), &[10.]);
}

#[test]
fn custom_fold_is_ordered() {
    let t = Tensor::<i32>::arange(&[2, 3], 1, 1).unwrap();
    let r = t.reduce(0, Seed::Value(0), |acc, v| acc * 10 + v, &[]).unwrap();
    assert_eq!(r.data(), &[123, 456]);
}

#[test]
fn fold_along_axis_matches_reduce() {
    let t = Tensor::<f64>::arange(&[2, 3, 5], 0., 1.).unwrap();
    let r = t.sum_along_axis(1).unwrap();
    for (i, start) in t.plane(1, 0).unwrap().into_iter().enumerate() {
        let v = t
            .fold_along_axis(start, 1, Seed::Value(0.), |a, b| a + b, &[])
            .unwrap();
        assert_eq!(v, r.data()[i]);
    }
}

#[test]
fn weight_length_mismatch_is_shape_error() {
    let t = Tensor::<f32>::ones(&[2, 3]).unwrap();
    assert!(t.weighted_sum_along_axis(0, &[1., 2.]).unwrap_err().is_shape());
    assert!(t
        .weighted_average_along_axis(1, &[1., 2., 3.])
        .unwrap_err()
        .is_shape());
    assert!(t
        .fold_along_axis(0, 1, Seed::Value(0.), |a, b| a + b, &[1.])
        .unwrap_err()
        .is_shape());
}

#[test]
fn bad_axis_is_axis_error() {
    let t = Tensor::<f32>::ones(&[2, 3]).unwrap();
    assert!(t.sum_along_axis(2).unwrap_err().is_axis());
    assert!(t.max_along_axis(5).unwrap_err().is_axis());
    assert!(t.average_along_axis(2).unwrap_err().is_axis());
}

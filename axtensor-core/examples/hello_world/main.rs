use axtensor_core::{BinaryOpType, Tensor};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let t = Tensor::<f32>::arange(&[2, 3, 5], 0., 1.).unwrap();
    println!("{t}");

    let sums = t.sum_along_axis(0).unwrap();
    println!("{sums}");
    assert_eq!(sums.data(), &[10., 35., 60., 85., 110., 135.]);

    let avg = t.average_along_axis(2).unwrap();
    println!("{avg}");

    let mut scaled = t.clone();
    scaled
        .transform_with(1, BinaryOpType::Mul, &[1., 0.5, 0.25])
        .unwrap();
    println!("{scaled:#}");
    dbg!(scaled.max_along_axis(1).unwrap().data());

    let res = ((t + 1.) * 2.).repeat_inner(2).unwrap();
    println!("{res:#}");
}

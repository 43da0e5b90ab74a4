use penalty_field::{
    geometry::{In3D, Point3, Vec3},
    PenaltyField,
};

pub const SHAPE: (usize, usize, usize) = (3, 3, 3);

#[rustfmt::skip]
pub const PENALTIES: [f64; 27] = [
    0.19338496,  0.08683781,  0.76232272,  0.10032556,  0.0311701,
    0.74030221,  0.4986186,   0.58865215,  0.63947176,  0.37107554,
    0.77703448,  0.94472095,  0.16495522,  0.2537881,   0.12636114,
    0.89338157,  0.18361576,  0.7980018,   0.58179607,  0.19751129,
    0.2025195,   0.70539315,  0.06764872,  0.90060331,  0.23950046,
    0.30006224,  0.33118872,
];

#[rustfmt::skip]
pub const GRADIENT_X: [f64; 27] = [
     0.17769058,  0.69019667,  0.18239823,  0.06462966,  0.222618,
    -0.61394108,  0.39476297, -0.40503639,  0.15853003,  0.19420555,
     0.05533674, -0.27990161,  0.30253379,  0.01823931,  0.08015055,
    -0.12955907, -0.14429495, -0.15414152,  0.21072053, -0.57952318,
    -0.74220145,  0.54043792, -0.18613938,  0.77424217, -0.65388111,
     0.11644648, -0.46681308,
];

#[rustfmt::skip]
pub const GRADIENT_Y: [f64; 27] = [
    -0.0930594,  -0.0556677,  -0.02202051,  0.15261682,  0.25090717,
    -0.06142548,  0.39829304,  0.55748205, -0.10083045, -0.20612032,
    -0.52324638, -0.81835981,  0.26115301, -0.29670936, -0.07335958,
     0.72842634, -0.07017234,  0.67164066,  0.12359707, -0.12986258,
     0.6980838,  -0.17114781,  0.05127547,  0.06433461, -0.46589269,
     0.23241353, -0.56941459,
];

#[rustfmt::skip]
pub const GRADIENT_Z: [f64; 27] = [
    -0.10654716,  0.28446888,  0.67548491, -0.06915546,  0.31998833,
     0.70913211,  0.09003355,  0.07042658,  0.05081961,  0.40595893,
     0.2868227,   0.16768647,  0.08883288, -0.01929704, -0.12742697,
    -0.70976581, -0.04768988,  0.61438604, -0.38428478, -0.18963829,
     0.00500821, -0.63774443,  0.09760508,  0.83295459,  0.06056178,
     0.04584413,  0.03112647,
];

/// A query point together with the penalty and gradient the reference
/// field should give there.
pub struct ReferenceQuery {
    pub point: Point3<f64>,
    pub penalty: f64,
    pub gradient: Vec3<f64>,
}

pub fn reference_queries() -> Vec<ReferenceQuery> {
    vec![
        ReferenceQuery {
            point: Point3::new(0.23352768013842229, 1.7767243859557733, 0.26601814042029426),
            penalty: 0.46275887,
            gradient: Vec3::new(0.11422513837340077, 0.39239411239478911, -0.037287388077032885),
        },
        ReferenceQuery {
            point: Point3::new(2.2485555785893334, 0.55614005239213393, 1.269660653465275),
            penalty: 0.0,
            gradient: Vec3::zero(),
        },
        ReferenceQuery {
            point: Point3::new(2.1185875346180856, 2.071751514751571, 1.509121136794852),
            penalty: 0.0,
            gradient: Vec3::zero(),
        },
        ReferenceQuery {
            point: Point3::new(1.8537692322878447, 1.2411053144925532, 1.4575584431698618),
            penalty: 0.39354775,
            gradient: Vec3::new(0.13306870948137786, -0.0026793299369999649, 0.29066137572319539),
        },
        ReferenceQuery {
            point: Point3::new(1.3542112341981949, 0.85807431414450286, 2.6060901323821746),
            penalty: 0.0,
            gradient: Vec3::zero(),
        },
    ]
}

pub fn reference_field() -> PenaltyField<f64> {
    PenaltyField::from_samples(
        Point3::origin(),
        Vec3::equal_components(1.0),
        In3D::new(SHAPE.0, SHAPE.1, SHAPE.2),
        &PENALTIES,
        &GRADIENT_X,
        &GRADIENT_Y,
        &GRADIENT_Z,
    )
    .expect("Reference samples should be valid")
}

use super::Param;
use std::ops::{Add, Div, Mul, Neg, Sub};

// Arithmetic on params builds derived nodes. Operands are aliased, not copied,
// so `&x + &x` reads `x` once per frame and is always exactly `2 * x`.
macro_rules! param_op {
    ($trait:ident, $method:ident, $ctor:ident) => {
        impl $trait<Param> for Param {
            type Output = Param;
            fn $method(self, rhs: Param) -> Param {
                Param::$ctor(vec![self, rhs])
            }
        }

        impl $trait<&Param> for Param {
            type Output = Param;
            fn $method(self, rhs: &Param) -> Param {
                Param::$ctor(vec![self, rhs.clone()])
            }
        }

        impl $trait<Param> for &Param {
            type Output = Param;
            fn $method(self, rhs: Param) -> Param {
                Param::$ctor(vec![self.clone(), rhs])
            }
        }

        impl $trait<&Param> for &Param {
            type Output = Param;
            fn $method(self, rhs: &Param) -> Param {
                Param::$ctor(vec![self.clone(), rhs.clone()])
            }
        }

        impl $trait<f64> for Param {
            type Output = Param;
            fn $method(self, rhs: f64) -> Param {
                Param::$ctor(vec![self, Param::fixed(rhs)])
            }
        }

        impl $trait<f64> for &Param {
            type Output = Param;
            fn $method(self, rhs: f64) -> Param {
                Param::$ctor(vec![self.clone(), Param::fixed(rhs)])
            }
        }

        impl $trait<Param> for f64 {
            type Output = Param;
            fn $method(self, rhs: Param) -> Param {
                Param::$ctor(vec![Param::fixed(self), rhs])
            }
        }

        impl $trait<&Param> for f64 {
            type Output = Param;
            fn $method(self, rhs: &Param) -> Param {
                Param::$ctor(vec![Param::fixed(self), rhs.clone()])
            }
        }
    };
}

param_op!(Add, add, sum);
param_op!(Sub, sub, difference);
param_op!(Mul, mul, product);
param_op!(Div, div, quotient);

impl Neg for Param {
    type Output = Param;
    fn neg(self) -> Param {
        Param::product(vec![Param::fixed(-1.0), self])
    }
}

impl Neg for &Param {
    type Output = Param;
    fn neg(self) -> Param {
        -self.clone()
    }
}

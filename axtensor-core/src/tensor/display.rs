use std::fmt;

use super::Tensor;
use crate::DType;

fn write_list(f: &mut fmt::Formatter<'_>, name: &str, xs: &[usize]) -> fmt::Result {
    write!(f, "   {name} =")?;
    for x in xs {
        write!(f, " {x}")?;
    }
    writeln!(f)
}

/// Dump dims, strides and values.
///
/// Values are written one row of the innermost axis per line, with an extra
/// line break at the end of every outer slice. The alternate form (`{:#}`)
/// leaves out the values.
impl<T: DType> fmt::Display for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tensor<{}>:", T::NAME)?;
        write_list(f, "dims", self.dims())?;
        write_list(f, "strides", self.strides())?;
        if f.alternate() {
            return Ok(());
        }
        write!(f, "   vals =\n      ")?;
        let strides = self.strides();
        for (i, v) in self.data.iter().enumerate() {
            write!(f, "{v} ")?;
            // strides[a - 1] is the size of the slice spanned by axes a..
            for a in (1..strides.len()).rev() {
                if (i + 1) % strides[a - 1] != 0 {
                    break;
                }
                write!(f, "\n      ")?;
            }
        }
        writeln!(f)
    }
}

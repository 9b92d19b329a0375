use serde::ser::{self, Serialize, Serializer};
use std::io::Write;

macro_rules! impl_disp_methods {
    ($(($method:ident, $ty:ty)),+ $(,)?) => {$(
        fn $method(self, v: $ty) -> Result<(), LogErr> {
            write!(self.w, "{v}").map_err(LogErr)
        }
    )+};
}

#[derive(Debug)]
pub(crate) struct LogErr(std::io::Error);

impl std::error::Error for LogErr {}

impl std::fmt::Display for LogErr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl ser::Error for LogErr {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        Self(std::io::Error::other(msg.to_string()))
    }
}

/// A TOML-like report writer.
///
/// Structs and maps are written as `key=value` lines, sequences as
/// `[a, b]`, floats with a fixed precision and `None` as `none`.
pub(crate) struct Logger<'a, W: Write> {
    w: &'a mut W,
    prec: usize,
}

impl<'a, W: Write> Logger<'a, W> {
    pub(crate) fn new(w: &'a mut W) -> Self {
        Self { w, prec: 4 }
    }

    pub(crate) fn top_title(&mut self, title: &str) -> std::io::Result<()> {
        writeln!(self.w, "[{title}]")
    }

    pub(crate) fn title(&mut self, title: &str) -> std::io::Result<()> {
        writeln!(self.w, "\n[{title}]")
    }

    pub(crate) fn log<S: Serialize>(&mut self, s: S) -> std::io::Result<()> {
        s.serialize(self).map_err(|e| e.0)
    }

    pub(crate) fn line(&mut self, key: &str, value: impl std::fmt::Display) -> std::io::Result<()> {
        writeln!(self.w, "{key}={value}")
    }

    fn float(&mut self, v: f64) -> Result<(), LogErr> {
        // No negative zero in reports
        let v = if v.abs() < 0.5 * 10f64.powi(-(self.prec as i32)) { 0. } else { v };
        write!(self.w, "{v:.prec$}", prec = self.prec).map_err(LogErr)
    }
}

impl<'a, 'b, W: Write> Serializer for &'a mut Logger<'b, W> {
    type Ok = ();
    type Error = LogErr;

    type SerializeSeq = Seq<'a, 'b, W>;
    type SerializeTuple = Seq<'a, 'b, W>;
    type SerializeTupleStruct = Seq<'a, 'b, W>;
    type SerializeTupleVariant = Seq<'a, 'b, W>;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    impl_disp_methods!(
        (serialize_bool, bool),
        (serialize_i8, i8),
        (serialize_i16, i16),
        (serialize_i32, i32),
        (serialize_i64, i64),
        (serialize_u8, u8),
        (serialize_u16, u16),
        (serialize_u32, u32),
        (serialize_u64, u64),
        (serialize_char, char),
        (serialize_str, &str),
        (serialize_unit_struct, &'static str),
    );

    fn serialize_f32(self, v: f32) -> Result<(), LogErr> {
        self.float(v.into())
    }

    fn serialize_f64(self, v: f64) -> Result<(), LogErr> {
        self.float(v)
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<(), LogErr> {
        v.serialize(self)
    }

    fn serialize_none(self) -> Result<(), LogErr> {
        write!(self.w, "none").map_err(LogErr)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<(), LogErr> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<(), LogErr> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<(), LogErr> {
        write!(self.w, "{variant}").map_err(LogErr)
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<(), LogErr> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<(), LogErr> {
        writeln!(self.w, "type={variant}").map_err(LogErr)?;
        value.serialize(self)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, LogErr> {
        write!(self.w, "[").map_err(LogErr)?;
        Ok(Seq { logger: self, first: true })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple, LogErr> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct, LogErr> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant, LogErr> {
        write!(self.w, "{variant}").map_err(LogErr)?;
        self.serialize_seq(Some(len))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, LogErr> {
        Ok(self)
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, LogErr> {
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, LogErr> {
        writeln!(self.w, "type={variant}").map_err(LogErr)?;
        Ok(self)
    }
}

pub(crate) struct Seq<'a, 'b, W: Write> {
    logger: &'a mut Logger<'b, W>,
    first: bool,
}

impl<W: Write> Seq<'_, '_, W> {
    fn element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), LogErr> {
        if !self.first {
            write!(self.logger.w, ", ").map_err(LogErr)?;
        }
        self.first = false;
        value.serialize(&mut *self.logger)
    }

    fn close(self) -> Result<(), LogErr> {
        write!(self.logger.w, "]").map_err(LogErr)
    }
}

macro_rules! impl_ser_seq {
    ($(($ty:ident, $method:ident)),+ $(,)?) => {$(
        impl<W: Write> ser::$ty for Seq<'_, '_, W> {
            type Ok = ();
            type Error = LogErr;

            fn $method<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), LogErr> {
                self.element(value)
            }

            fn end(self) -> Result<(), LogErr> {
                self.close()
            }
        }
    )+};
}

impl_ser_seq!(
    (SerializeSeq, serialize_element),
    (SerializeTuple, serialize_element),
    (SerializeTupleStruct, serialize_field),
    (SerializeTupleVariant, serialize_field),
);

impl<W: Write> ser::SerializeMap for &mut Logger<'_, W> {
    type Ok = ();
    type Error = LogErr;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), LogErr> {
        key.serialize(&mut **self)?;
        write!(self.w, "=").map_err(LogErr)
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), LogErr> {
        value.serialize(&mut **self)?;
        writeln!(self.w).map_err(LogErr)
    }

    fn end(self) -> Result<(), LogErr> {
        Ok(())
    }
}

macro_rules! impl_ser_struct {
    ($($ty:ident),+ $(,)?) => {$(
        impl<W: Write> ser::$ty for &mut Logger<'_, W> {
            type Ok = ();
            type Error = LogErr;

            fn serialize_field<T: ?Sized + Serialize>(
                &mut self,
                key: &'static str,
                value: &T,
            ) -> Result<(), LogErr> {
                write!(self.w, "{key}=").map_err(LogErr)?;
                value.serialize(&mut **self)?;
                writeln!(self.w).map_err(LogErr)
            }

            fn end(self) -> Result<(), LogErr> {
                Ok(())
            }
        }
    )+};
}

impl_ser_struct!(SerializeStruct, SerializeStructVariant);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Serialize)]
    struct Report {
        name: &'static str,
        value: f64,
        list: [f64; 2],
        missing: Option<f64>,
    }

    #[test]
    fn toml_like() {
        let mut buf = Vec::new();
        let mut log = Logger::new(&mut buf);
        log.top_title("report").unwrap();
        let report = Report { name: "a", value: -0., list: [1., 0.5], missing: None };
        log.log(&report).unwrap();
        log.title("more").unwrap();
        log.line("count", 3).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert_eq!(
            s,
            "[report]\nname=a\nvalue=0.0000\nlist=[1.0000, 0.5000]\nmissing=none\n\n[more]\ncount=3\n"
        );
    }
}

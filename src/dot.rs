//! Graphviz rendering of the link structure.
//!
//! Every level is drawn as a chain of edges starting at the head, top level
//! first. Nodes are named after their arena slot and edges are labelled with
//! the span of the link they stand for:
//!
//! ```text
//! digraph {
//! rankdir="LR"
//! "HEAD\lnum_nodes: 2"->"#0\lvalue: 1"[ label="1" ];
//! "#0\lvalue: 1"->"#1\lvalue: 2"[ label="1" ];
//! "#1\lvalue: 2"->TAIL[ label="0" ];
//! }
//! ```

use std::{
    fmt::Display,
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::{SkipList, error::SkipListError, skipnode::Position};

impl<T, C, G> SkipList<T, C, G> {
    /// Write the structure as a Graphviz digraph, rendering each value with
    /// `fmt_value`.
    ///
    /// # Errors
    ///
    /// [`SkipListError::Io`] if writing to `sink` fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Write;
    ///
    /// use ranked_skiplist::SkipList;
    ///
    /// let skiplist: SkipList<_> = [(1, 'a'), (2, 'b')].into_iter().collect();
    /// let mut dot = Vec::new();
    /// skiplist.write_dot_with(&mut dot, |sink, (k, v)| write!(sink, "{k}={v}"))?;
    /// assert!(String::from_utf8_lossy(&dot).contains(r"value: 2=b"));
    /// # Ok::<(), ranked_skiplist::SkipListError>(())
    /// ```
    pub fn write_dot_with<W, F>(&self, sink: &mut W, mut fmt_value: F) -> Result<(), SkipListError>
    where
        W: Write,
        F: FnMut(&mut W, &T) -> io::Result<()>,
    {
        writeln!(sink, "digraph {{")?;
        writeln!(sink, "rankdir=\"LR\"")?;
        for level in (0..self.max_levels()).rev() {
            let mut current = Position::Head;
            loop {
                let link = self.storage.link(current, level);
                self.write_name(sink, current, &mut fmt_value)?;
                write!(sink, "->")?;
                match link.next {
                    Some(next) => self.write_name(sink, Position::Node(next), &mut fmt_value)?,
                    None => write!(sink, "TAIL")?,
                }
                writeln!(sink, "[ label=\"{}\" ];", link.span)?;
                match link.next {
                    Some(next) => current = Position::Node(next),
                    None => break,
                }
            }
        }
        writeln!(sink, "}}")?;
        Ok(())
    }

    /// Write the structure as a Graphviz digraph using each value's
    /// [`Display`] implementation.
    ///
    /// # Errors
    ///
    /// [`SkipListError::Io`] if writing to `sink` fails.
    #[inline]
    pub fn write_dot<W: Write>(&self, sink: &mut W) -> Result<(), SkipListError>
    where
        T: Display,
    {
        self.write_dot_with(sink, |sink, value| write!(sink, "{value}"))
    }

    /// Write the structure as a Graphviz digraph into the file at `path`,
    /// creating or truncating it.
    ///
    /// # Errors
    ///
    /// [`SkipListError::Io`] if the file cannot be created or written.
    pub fn save_dot<P: AsRef<Path>>(&self, path: P) -> Result<(), SkipListError>
    where
        T: Display,
    {
        let path = path.as_ref();
        debug_log!(path = %path.display(), "saving skiplist structure");
        let mut sink = BufWriter::new(File::create(path)?);
        self.write_dot(&mut sink)?;
        sink.flush()?;
        Ok(())
    }

    fn write_name<W, F>(&self, sink: &mut W, position: Position, fmt_value: &mut F) -> io::Result<()>
    where
        W: Write,
        F: FnMut(&mut W, &T) -> io::Result<()>,
    {
        match position {
            Position::Head => write!(sink, "\"HEAD\\lnum_nodes: {}\"", self.len()),
            Position::Node(id) => {
                write!(sink, "\"#{}\\lvalue: ", id.index())?;
                fmt_value(sink, self.storage.value(id))?;
                write!(sink, "\"")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};

    use anyhow::Result;
    use pretty_assertions::assert_eq;

    use crate::{
        SkipList,
        config::Config,
        error::{ErrorKind, SkipListError},
    };

    fn render<T: std::fmt::Display>(skiplist: &SkipList<T>) -> Result<String> {
        let mut dot = Vec::new();
        skiplist.write_dot(&mut dot)?;
        Ok(String::from_utf8(dot)?)
    }

    #[test]
    fn empty() -> Result<()> {
        let sl: SkipList<u8> = SkipList::with_config(Config::default().with_max_levels(2))?;
        insta::assert_snapshot!(render(&sl)?, @r##"
        digraph {
        rankdir="LR"
        "HEAD\lnum_nodes: 0"->TAIL[ label="0" ];
        "HEAD\lnum_nodes: 0"->TAIL[ label="0" ];
        }
        "##);
        Ok(())
    }

    #[test]
    fn three_nodes() -> Result<()> {
        let mut sl = SkipList::with_config(Config::default().with_max_levels(2))?;
        sl.extend([1, 2, 3]);
        insta::assert_snapshot!(render(&sl)?, @r##"
        digraph {
        rankdir="LR"
        "HEAD\lnum_nodes: 3"->"#1\lvalue: 2"[ label="2" ];
        "#1\lvalue: 2"->TAIL[ label="1" ];
        "HEAD\lnum_nodes: 3"->"#0\lvalue: 1"[ label="1" ];
        "#0\lvalue: 1"->"#1\lvalue: 2"[ label="1" ];
        "#1\lvalue: 2"->"#2\lvalue: 3"[ label="1" ];
        "#2\lvalue: 3"->TAIL[ label="0" ];
        }
        "##);
        Ok(())
    }

    #[test]
    fn custom_formatter() -> Result<()> {
        let mut sl = SkipList::with_config(Config::default().with_max_levels(1))?;
        sl.extend(["b", "a"]);
        let mut dot = Vec::new();
        sl.write_dot_with(&mut dot, |sink, value| write!(sink, "<{}>", value.to_uppercase()))?;
        let dot = String::from_utf8(dot)?;
        assert_eq!(
            dot.lines().nth(2),
            Some(r##""HEAD\lnum_nodes: 2"->"#1\lvalue: <A>"[ label="1" ];"##)
        );
        Ok(())
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("broken pipe"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure() {
        let sl: SkipList<_> = (0..4).collect();
        let err = sl.write_dot(&mut Broken).unwrap_err();
        assert!(matches!(err, SkipListError::Io(_)));
        assert_eq!(err.kind(), ErrorKind::IoFailure);
    }

    #[test]
    fn save() -> Result<()> {
        let sl: SkipList<_> = (0..4).collect();
        let path = std::env::temp_dir().join(format!("ranked-skiplist-{}.dot", std::process::id()));
        sl.save_dot(&path)?;
        let saved = std::fs::read_to_string(&path)?;
        std::fs::remove_file(&path)?;
        assert_eq!(saved, render(&sl)?);

        let err = sl
            .save_dot(std::env::temp_dir().join("no-such-dir").join("skiplist.dot"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoFailure);
        Ok(())
    }
}

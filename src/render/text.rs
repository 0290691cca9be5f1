use crate::results::{ResultCollector, SpecResult, SpecVisitor, Summary};
use std::io::{self, Write};

/// Low-level text layout for a report.
pub trait PrintFormat {
    fn print_spec(&mut self, name: &str, depth: usize, failing: bool) -> io::Result<()>;
    fn print_error(&mut self, message: &str, depth: usize) -> io::Result<()>;
    fn print_summary(&mut self, summary: Summary) -> io::Result<()>;
}

/// Plain indented layout:
///
/// ```text
/// - RootSpec [FAIL]
///     Expected '20' but was '10'
///   - Child A
///
/// 2 specs, 1 failures
/// ```
pub struct SimplePrintFormat<W> {
    out: W,
    printed_specs: bool,
}

impl<W: Write> SimplePrintFormat<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            printed_specs: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

impl<W: Write> PrintFormat for SimplePrintFormat<W> {
    fn print_spec(&mut self, name: &str, depth: usize, failing: bool) -> io::Result<()> {
        self.printed_specs = true;
        let suffix = if failing { " [FAIL]" } else { "" };
        writeln!(self.out, "{}- {}{}", indent(depth), name, suffix)
    }

    fn print_error(&mut self, message: &str, depth: usize) -> io::Result<()> {
        // Messages sit four columns in from their spec, not one level deeper.
        writeln!(self.out, "{}    {}", indent(depth), message)
    }

    fn print_summary(&mut self, summary: Summary) -> io::Result<()> {
        if self.printed_specs {
            writeln!(self.out)?;
        }
        writeln!(
            self.out,
            "{} specs, {} failures",
            summary.specs, summary.failures
        )
    }
}

/// Turns the collector's traversal into formatted lines.
pub struct Printer<F> {
    format: F,
}

impl<F: PrintFormat> Printer<F> {
    pub fn new(format: F) -> Self {
        Self { format }
    }

    pub fn into_format(self) -> F {
        self.format
    }
}

impl<F: PrintFormat> SpecVisitor for Printer<F> {
    type Error = io::Error;

    fn visit_spec(&mut self, spec: &SpecResult, depth: usize) -> io::Result<()> {
        self.format.print_spec(spec.name(), depth, spec.is_failing())?;
        for message in spec.errors() {
            self.format.print_error(message, depth)?;
        }
        Ok(())
    }

    fn visit_end(&mut self, summary: Summary) -> io::Result<()> {
        self.format.print_summary(summary)
    }
}

/// Render the plain text report into a string.
pub fn render_text_report(results: &ResultCollector) -> anyhow::Result<String> {
    let mut printer = Printer::new(SimplePrintFormat::new(Vec::new()));
    results.visit(&mut printer)?;
    let bytes = printer.into_format().into_inner();
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::SpecRun;
    use pretty_assertions::assert_eq;

    fn report(results: &ResultCollector) -> String {
        render_text_report(results).unwrap()
    }

    #[test]
    fn zero_specs() {
        let results = ResultCollector::new();
        assert_eq!(report(&results), "0 specs, 0 failures\n");
    }

    #[test]
    fn spec_with_no_children() {
        let mut results = ResultCollector::new();
        results.update(&SpecRun::root("RootSpec"));
        assert_eq!(report(&results), "- RootSpec\n\n1 specs, 0 failures\n");
    }

    #[test]
    fn many_root_specs_are_sorted_alphabetically() {
        let mut results = ResultCollector::new();
        results.update(&SpecRun::root("RootSpec2"));
        results.update(&SpecRun::root("RootSpec1"));
        results.update(&SpecRun::root("RootSpec3"));

        assert_eq!(
            report(&results),
            "\
- RootSpec1
- RootSpec2
- RootSpec3

3 specs, 0 failures
"
        );
    }

    #[test]
    fn nested_children() {
        let mut results = ResultCollector::new();
        let mut root = SpecRun::root("RootSpec");
        let mut a = root.child("Child A");
        let aa = a.child("Child AA");
        results.update(&root);
        results.update(&a);
        results.update(&aa);

        assert_eq!(
            report(&results),
            "\
- RootSpec
  - Child A
    - Child AA

3 specs, 0 failures
"
        );
    }

    #[test]
    fn ancestors_never_observed_print_without_names() {
        let mut results = ResultCollector::new();
        let mut root = SpecRun::root("R");
        let mut a = root.child("A");
        results.update(&a.child("AA"));

        assert_eq!(report(&results), "- \n  - \n    - AA\n\n3 specs, 0 failures\n");
    }

    #[test]
    fn multiple_nested_children_from_leaf_executions() {
        // One execution per leaf path, each visiting the ancestors again.
        let mut results = ResultCollector::new();
        let leaves: [(usize, usize); 5] = [(0, 0), (0, 1), (1, 0), (1, 1), (1, 2)];
        for (target_branch, target_leaf) in leaves {
            let mut root = SpecRun::root("DummySpecWithMultipleNestedChildren");
            results.update(&root);
            for (branch, branch_name) in ["Child A", "Child B"].into_iter().enumerate() {
                let mut child = root.child(branch_name);
                if branch != target_branch {
                    continue;
                }
                results.update(&child);
                let leaf_names: &[&str] = if branch == 0 {
                    &["Child AA", "Child AB"]
                } else {
                    &["Child BA", "Child BB", "Child BC"]
                };
                for (leaf, leaf_name) in leaf_names.iter().enumerate() {
                    let grandchild = child.child(*leaf_name);
                    if leaf == target_leaf {
                        results.update(&grandchild);
                    }
                }
            }
        }

        assert_eq!(
            report(&results),
            "\
- DummySpecWithMultipleNestedChildren
  - Child A
    - Child AA
    - Child AB
  - Child B
    - Child BA
    - Child BB
    - Child BC

8 specs, 0 failures
"
        );
    }

    #[test]
    fn failing_specs_list_their_messages() {
        let mut results = ResultCollector::new();
        let mut failing = SpecRun::root("Failing");
        failing.add_error("X did not equal Y");
        results.update(&failing);

        let mut passing = SpecRun::root("Passing");
        let mut child = passing.child("Child failing");
        child.add_error("moon was not cheese");
        results.update(&passing);
        results.update(&child);

        assert_eq!(
            report(&results),
            "\
- Failing [FAIL]
    X did not equal Y
- Passing
  - Child failing [FAIL]
      moon was not cheese

3 specs, 2 failures
"
        );
    }

    #[test]
    fn spec_passing_first_then_failing_is_reported() {
        let mut results = ResultCollector::new();
        for execution in 0..2 {
            let mut root = SpecRun::root("RootSpec");
            if execution == 1 {
                root.add_error("Expected '20' but was '10'");
            }
            let a = root.child("Child A");
            let b = root.child("Child B");
            results.update(&root);
            results.update(if execution == 0 { &a } else { &b });
        }

        assert_eq!(
            report(&results),
            "\
- RootSpec [FAIL]
    Expected '20' but was '10'
  - Child A
  - Child B

3 specs, 1 failures
"
        );
    }

    #[test]
    fn sporadic_root_failures_are_merged() {
        let mut results = ResultCollector::new();
        // The second assertion sees shared state that each child mutates.
        for (state, leaf) in [(0, None), (1, Some(0)), (2, Some(1))] {
            let mut root = SpecRun::root("RootSpec");
            let a = root.child("Child A");
            let b = root.child("Child B");
            root.add_error("Expected '20' but was '10'");
            root.add_error(format!("Expected '20' but was '{}'", 10 + state));
            results.update(&root);
            match leaf {
                Some(0) => results.update(&a),
                Some(_) => results.update(&b),
                None => {}
            }
        }

        assert_eq!(
            report(&results),
            "\
- RootSpec [FAIL]
    Expected '20' but was '10'
    Expected '20' but was '11'
    Expected '20' but was '12'
  - Child A
  - Child B

3 specs, 1 failures
"
        );
    }

    #[test]
    fn sporadic_nested_failures_are_merged() {
        let mut results = ResultCollector::new();
        for (state, leaf) in [(1, 0), (2, 1)] {
            let mut root = SpecRun::root("RootSpec");
            let mut failing = root.child("Failing");
            let a = failing.child("Child A");
            let b = failing.child("Child B");
            failing.add_error("Expected '20' but was '10'");
            failing.add_error(format!("Expected '20' but was '{}'", 10 + state));
            results.update(&root);
            results.update(&failing);
            results.update(if leaf == 0 { &a } else { &b });
        }

        assert_eq!(
            report(&results),
            "\
- RootSpec
  - Failing [FAIL]
      Expected '20' but was '10'
      Expected '20' but was '11'
      Expected '20' but was '12'
    - Child A
    - Child B

4 specs, 1 failures
"
        );
    }

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn sink_errors_propagate_unchanged() {
        let mut results = ResultCollector::new();
        results.update(&SpecRun::root("RootSpec"));
        let mut printer = Printer::new(SimplePrintFormat::new(BrokenSink));
        let err = results.visit(&mut printer).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}

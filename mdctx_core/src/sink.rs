use crate::Context;

/// Receives each node as soon as the builder emits it, in emission order.
pub trait ContextSink {
	fn accept(&mut self, context: Context);
}

impl<F> ContextSink for F
where
	F: FnMut(Context),
{
	fn accept(&mut self, context: Context) {
		self(context);
	}
}

impl ContextSink for Vec<Context> {
	fn accept(&mut self, context: Context) {
		self.push(context);
	}
}

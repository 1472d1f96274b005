use bindump::bindata::{TYPE_KEY, Value};

/// Output truncation and formatting limits for decoded values.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of entries printed for a single object.
	pub max_entries_per_object: usize,
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum number of elements printed for arrays.
	pub max_array_items: usize,
	/// Maximum recursive print depth for nested arrays/objects.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_entries_per_object: 80,
			max_string_len: 200,
			max_array_items: 16,
			max_print_depth: 6,
		}
	}
}

/// Render one decoded value tree as indented text.
pub fn render_tree(value: &Value, options: PrintOptions) -> String {
	let mut printer = Printer { out: String::new(), options };
	printer.value(value, 0, 0);
	printer.out
}

struct Printer {
	out: String,
	options: PrintOptions,
}

impl Printer {
	fn line(&mut self, indent: usize, text: &str) {
		self.out.extend(std::iter::repeat_n(' ', indent));
		self.out.push_str(text);
		self.out.push('\n');
	}

	fn value(&mut self, value: &Value, indent: usize, depth: u32) {
		match value {
			Value::Array(items) => self.array(items, indent, depth),
			Value::Object(_) => self.object(value, indent, depth),
			scalar => {
				let text = scalar_text(scalar, self.options.max_string_len);
				self.line(indent, &text);
			}
		}
	}

	fn array(&mut self, items: &[Value], indent: usize, depth: u32) {
		if depth >= self.options.max_print_depth {
			self.line(indent, &format!("[... {} items]", items.len()));
			return;
		}

		self.line(indent, "[");
		for item in items.iter().take(self.options.max_array_items) {
			self.value(item, indent + 2, depth + 1);
		}
		if items.len() > self.options.max_array_items {
			self.line(indent + 2, &format!("... {} more", items.len() - self.options.max_array_items));
		}
		self.line(indent, "]");
	}

	fn object(&mut self, value: &Value, indent: usize, depth: u32) {
		let header = match value.type_tag() {
			Some(tag) => format!("{tag} {{"),
			None => "{".to_owned(),
		};
		let entries: Vec<_> = value.as_object().unwrap_or_default().iter().filter(|entry| entry.key.as_ref() != TYPE_KEY).collect();

		if depth >= self.options.max_print_depth {
			self.line(indent, &format!("{} ... {} entries }}", header, entries.len()));
			return;
		}

		self.line(indent, &header);
		let max = self.options.max_entries_per_object;
		for entry in entries.iter().take(max) {
			if matches!(entry.value, Value::Array(_) | Value::Object(_)) {
				self.line(indent + 2, &format!("{} =", entry.key));
				self.value(&entry.value, indent + 4, depth + 1);
			} else {
				let text = scalar_text(&entry.value, self.options.max_string_len);
				self.line(indent + 2, &format!("{} = {}", entry.key, text));
			}
		}
		if entries.len() > max {
			self.line(indent + 2, &format!("... {} more entries", entries.len() - max));
		}
		self.line(indent, "}");
	}
}

fn scalar_text(value: &Value, max_string_len: usize) -> String {
	match value {
		Value::Null => "null".to_owned(),
		Value::Bool(v) => v.to_string(),
		Value::I64(v) => v.to_string(),
		Value::U64(v) => v.to_string(),
		Value::F32(v) => v.to_string(),
		Value::F64(v) => v.to_string(),
		Value::String(v) => format!("\"{}\"", truncate(v, max_string_len)),
		Value::Array(items) => format!("[{} items]", items.len()),
		Value::Object(entries) => format!("{{{} entries}}", entries.len()),
	}
}

fn truncate(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return input.to_owned();
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out}...")
}

#[cfg(test)]
mod tests;

use serde_json::value::RawValue;

/// Represents a processed page ready for writing
pub struct ProcessedBatch {
    pub buffer: Vec<u8>,
    pub doc_count: u64,
}

/// Render every document of a page as one compact JSON line.
pub fn process_documents(documents: &[Box<RawValue>]) -> ProcessedBatch {
    if documents.is_empty() {
        return ProcessedBatch {
            buffer: Vec::new(),
            doc_count: 0,
        };
    }

    // Compacting never grows a document, so the raw length plus newlines is an upper bound.
    let capacity = documents.iter().map(|doc| doc.get().len() + 1).sum();
    let mut buffer = Vec::with_capacity(capacity);

    for doc in documents {
        compact_into(doc.get(), &mut buffer);
        buffer.push(b'\n');
    }

    ProcessedBatch {
        buffer,
        doc_count: documents.len() as u64,
    }
}

/// Copy a JSON text into `out` without insignificant whitespace.
///
/// The input must already be valid JSON. String literals are copied
/// untouched, so member order and number spelling survive as received.
pub fn compact_into(raw: &str, out: &mut Vec<u8>) {
    let mut in_string = false;
    let mut escaped = false;

    for &byte in raw.as_bytes() {
        if in_string {
            out.push(byte);
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }

        match byte {
            b' ' | b'\t' | b'\n' | b'\r' => {}
            b'"' => {
                in_string = true;
                out.push(byte);
            }
            _ => out.push(byte),
        }
    }
}

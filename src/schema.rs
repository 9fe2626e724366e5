//! Static input/output field descriptions for the download task.
//!
//! The engine's documentation generator consumes these tables; they are kept
//! separate from the struct definitions so documentation is a pure function
//! of struct shape plus table, not per-field metadata.

/// Description of one input or output field, by its wire (camelCase) name.
pub struct FieldSpec {
    pub name: &'static str,
    pub description: &'static str,
    /// Whether the field is rendered through the template engine (inputs only).
    pub dynamic: bool,
    pub required: bool,
}

/// Inputs of [`crate::DownloadRequest`].
pub static INPUT_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "bucket",
        description: "The bucket holding the object to download.",
        dynamic: true,
        required: true,
    },
    FieldSpec {
        name: "key",
        description: "The key of the object to download.",
        dynamic: true,
        required: true,
    },
    FieldSpec {
        name: "versionId",
        description: "VersionId used to reference a specific version of the object.",
        dynamic: true,
        required: false,
    },
    FieldSpec {
        name: "requestPayer",
        description: "Confirms that the requester pays for the transfer.",
        dynamic: true,
        required: false,
    },
];

/// Outputs of [`crate::DownloadResult`].
pub static OUTPUT_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "uri",
        description: "URI of the artifact holding the downloaded body.",
        dynamic: false,
        required: true,
    },
    FieldSpec {
        name: "contentLength",
        description: "Size of the body in bytes.",
        dynamic: false,
        required: true,
    },
    FieldSpec {
        name: "contentType",
        description: "A standard MIME type describing the format of the object data.",
        dynamic: false,
        required: false,
    },
    FieldSpec {
        name: "metadata",
        description: "A map of metadata stored with the object.",
        dynamic: false,
        required: true,
    },
    FieldSpec {
        name: "eTag",
        description: "Entity tag of the retrieved object revision.",
        dynamic: false,
        required: false,
    },
    FieldSpec {
        name: "versionId",
        description: "Version of the object that was served.",
        dynamic: false,
        required: false,
    },
];

/// Render the task's reference documentation as markdown.
pub fn reference_doc() -> String {
    let mut doc = String::from("# Download\n\nDownload an object from a blob store bucket.\n");
    for (title, fields) in [("Inputs", INPUT_FIELDS), ("Outputs", OUTPUT_FIELDS)] {
        doc.push_str(&format!("\n## {}\n\n", title));
        for field in fields {
            doc.push_str(&format!(
                "* `{}`{}{} -- {}\n",
                field.name,
                if field.required { "" } else { " (optional)" },
                if field.dynamic { " (templated)" } else { "" },
                field.description,
            ));
        }
    }
    doc
}

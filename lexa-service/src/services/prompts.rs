//! Instruction prompts sent to the generation provider.

/// Statutory text -> semantically tagged XML.
pub fn legal_to_xml(legal_text: &str) -> String {
    format!(
        "Convert this legal statute/provision to structured XML format:\n\
         \n\
         {legal_text}\n\
         \n\
         Return only valid XML with appropriate semantic tags for legal elements \
         (sections, subsections, definitions, requirements, etc.)."
    )
}

/// XML -> natural legal language.
pub fn xml_to_legal(xml_text: &str) -> String {
    format!(
        "Convert this XML to natural legal language:\n\
         \n\
         {xml_text}\n\
         \n\
         Return clear, properly formatted legal text that maintains the original \
         structure and meaning."
    )
}

/// Report sections the evaluation prompt asks for, in order.
pub const EVALUATION_SECTIONS: [&str; 7] = [
    "Summary",
    "Coverage",
    "Accuracy",
    "Completeness",
    "Structure & Semantics",
    "Gaps & Issues",
    "Recommendations",
];

/// Review of how faithfully `xml_text` encodes the requirements in `legal_text`.
pub fn evaluation(legal_text: &str, xml_text: &str) -> String {
    let sections: String = EVALUATION_SECTIONS
        .iter()
        .map(|section| format!("- {section}\n"))
        .collect();

    format!(
        "Evaluate how well the following XML implementation captures the statutory \
         requirements in the legal text.\n\
         \n\
         Legal Text:\n\
         {legal_text}\n\
         \n\
         XML Implementation:\n\
         {xml_text}\n\
         \n\
         Provide a clear, structured report that includes:\n\
         {sections}\
         \n\
         Be specific and cite exact elements/phrases when noting issues."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legal_to_xml_embeds_text_between_instructions() {
        let prompt = legal_to_xml("Section 1. Definitions.");
        assert!(prompt.starts_with("Convert this legal statute/provision to structured XML"));
        assert!(prompt.contains("\n\nSection 1. Definitions.\n\n"));
        assert!(prompt.ends_with("(sections, subsections, definitions, requirements, etc.)."));
    }

    #[test]
    fn xml_to_legal_embeds_xml() {
        let prompt = xml_to_legal("<section id=\"1\"/>");
        assert!(prompt.starts_with("Convert this XML to natural legal language:"));
        assert!(prompt.contains("<section id=\"1\"/>"));
        assert!(prompt.contains("maintains the original structure and meaning"));
    }

    #[test]
    fn evaluation_lists_every_section_after_both_inputs() {
        let prompt = evaluation("The tenant shall pay rent.", "<obligation party=\"tenant\"/>");

        let legal_at = prompt.find("Legal Text:\nThe tenant shall pay rent.").unwrap();
        let xml_at = prompt
            .find("XML Implementation:\n<obligation party=\"tenant\"/>")
            .unwrap();
        assert!(legal_at < xml_at);

        let mut last = xml_at;
        for section in EVALUATION_SECTIONS {
            let at = prompt.find(&format!("- {section}\n")).unwrap();
            assert!(at > last, "{section} out of order");
            last = at;
        }
        assert!(prompt.ends_with("cite exact elements/phrases when noting issues."));
    }
}

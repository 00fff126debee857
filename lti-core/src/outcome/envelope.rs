//! IMS POX envelope for `replaceResultRequest`

use uuid::Uuid;

use crate::markup::escape;

use super::ScoreSubmission;

/// Namespace of the LTI 1.1 outcome management service
pub const IMS_OMS_NAMESPACE: &str = "http://www.imsglobal.org/services/ltiv1p1/xsd/imsoms_v1p0";

const POX_VERSION: &str = "V1.0";

/// A `replaceResultRequest` message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceResultRequest {
    pub message_identifier: String,
    pub sourced_id: String,
    pub score: String,
    pub language: String,
}

impl ReplaceResultRequest {
    /// Message for a submission, with a fresh message identifier
    pub fn new(submission: &ScoreSubmission) -> Self {
        Self {
            message_identifier: Uuid::new_v4().simple().to_string(),
            sourced_id: submission.sourced_id.clone(),
            score: submission.score.clone(),
            language: "en".to_string(),
        }
    }

    /// Serialize the envelope; every value is escaped
    pub fn to_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<imsx_POXEnvelopeRequest xmlns="{namespace}">
  <imsx_POXHeader>
    <imsx_POXRequestHeaderInfo>
      <imsx_version>{version}</imsx_version>
      <imsx_messageIdentifier>{message_identifier}</imsx_messageIdentifier>
    </imsx_POXRequestHeaderInfo>
  </imsx_POXHeader>
  <imsx_POXBody>
    <replaceResultRequest>
      <resultRecord>
        <sourcedGUID>
          <sourcedId>{sourced_id}</sourcedId>
        </sourcedGUID>
        <result>
          <resultScore>
            <language>{language}</language>
            <textString>{score}</textString>
          </resultScore>
        </result>
      </resultRecord>
    </replaceResultRequest>
  </imsx_POXBody>
</imsx_POXEnvelopeRequest>
"#,
            namespace = IMS_OMS_NAMESPACE,
            version = POX_VERSION,
            message_identifier = escape(&self.message_identifier),
            sourced_id = escape(&self.sourced_id),
            language = escape(&self.language),
            score = escape(&self.score),
        )
    }
}

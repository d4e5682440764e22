//! Image Builder ARN construction
//!
//! Pure string formatting, no network. Image Builder requires lower-case
//! resource names in ARNs, and skylift additionally maps spaces to hyphens
//! so display names like "My Recipe" stay usable. Identical inputs always
//! produce byte-identical output.

/// Lower-case a name and replace spaces with hyphens, as Image Builder ARNs
/// require.
pub fn normalize(name: &str) -> String {
    name.trim().replace(' ', "-").to_lowercase()
}

/// `arn:aws:imagebuilder:{region}:{account}:component/{name}/{version}`
pub fn component(region: &str, account_id: &str, name: &str, version: &str) -> String {
    format!(
        "arn:aws:imagebuilder:{region}:{account_id}:component/{}/{}",
        normalize(name),
        normalize(version),
    )
}

/// `arn:aws:imagebuilder:{region}:{account}:image-recipe/{name}/{version}`
pub fn image_recipe(region: &str, account_id: &str, name: &str, version: &str) -> String {
    format!(
        "arn:aws:imagebuilder:{region}:{account_id}:image-recipe/{}/{}",
        normalize(name),
        normalize(version),
    )
}

/// `arn:aws:imagebuilder:{region}:{account}:infrastructure-configuration/{name}`
pub fn infrastructure_configuration(region: &str, account_id: &str, name: &str) -> String {
    format!(
        "arn:aws:imagebuilder:{region}:{account_id}:infrastructure-configuration/{}",
        normalize(name),
    )
}

/// `arn:aws:imagebuilder:{region}:{account}:distribution-configuration/{name}`
pub fn distribution_configuration(region: &str, account_id: &str, name: &str) -> String {
    format!(
        "arn:aws:imagebuilder:{region}:{account_id}:distribution-configuration/{}",
        normalize(name),
    )
}

/// `arn:aws:imagebuilder:{region}:{account}:image-pipeline/{name}`
pub fn image_pipeline(region: &str, account_id: &str, name: &str) -> String {
    format!(
        "arn:aws:imagebuilder:{region}:{account_id}:image-pipeline/{}",
        normalize(name),
    )
}

/// ARN of an AWS-managed parent image:
/// `arn:aws:imagebuilder:{region}:aws:image/{name}/{os_version}`
pub fn parent_image(region: &str, image_name: &str, os_version: &str) -> String {
    format!(
        "arn:aws:imagebuilder:{region}:aws:image/{}/{}",
        normalize(image_name),
        normalize(os_version),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_spaces() {
        assert_eq!(normalize("My Recipe"), "my-recipe");
        assert_eq!(normalize("  Ubuntu Server 20  "), "ubuntu-server-20");
        assert_eq!(normalize("already-lower"), "already-lower");
    }

    #[test]
    fn image_recipe_arn() {
        assert_eq!(
            image_recipe("us-east-1", "123456789012", "My Recipe", "1.0.0"),
            "arn:aws:imagebuilder:us-east-1:123456789012:image-recipe/my-recipe/1.0.0",
        );
    }

    #[test]
    fn component_arn() {
        assert_eq!(
            component("eu-west-1", "123456789012", "Patch Component", "2.1.0"),
            "arn:aws:imagebuilder:eu-west-1:123456789012:component/patch-component/2.1.0",
        );
    }

    #[test]
    fn unversioned_arns() {
        assert_eq!(
            infrastructure_configuration("us-east-1", "123456789012", "Build Infra"),
            "arn:aws:imagebuilder:us-east-1:123456789012:infrastructure-configuration/build-infra",
        );
        assert_eq!(
            distribution_configuration("us-east-1", "123456789012", "Dist"),
            "arn:aws:imagebuilder:us-east-1:123456789012:distribution-configuration/dist",
        );
        assert_eq!(
            image_pipeline("us-east-1", "123456789012", "Nightly Patch"),
            "arn:aws:imagebuilder:us-east-1:123456789012:image-pipeline/nightly-patch",
        );
    }

    #[test]
    fn parent_image_uses_aws_account_segment() {
        assert_eq!(
            parent_image("us-east-1", "Ubuntu Server 20", "20.04"),
            "arn:aws:imagebuilder:us-east-1:aws:image/ubuntu-server-20/20.04",
        );
    }

    #[test]
    fn formatting_is_deterministic() {
        let a = image_recipe("us-east-1", "123456789012", "My Recipe", "1.0.0");
        let b = image_recipe("us-east-1", "123456789012", "My Recipe", "1.0.0");
        assert_eq!(a, b);
    }
}
